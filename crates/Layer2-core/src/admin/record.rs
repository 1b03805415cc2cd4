//! Admin 레코드

use serde::Serialize;
use warden_foundation::{AdminIdentity, CiString, PermissionSet};

/// 해석이 끝난 관리자 레코드 (모듈 하나 범위)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    name: String,
    identity: AdminIdentity,
    immunity: u8,
    permissions: PermissionSet,
}

impl Admin {
    pub fn new(
        name: impl Into<String>,
        identity: AdminIdentity,
        immunity: u8,
        permissions: PermissionSet,
    ) -> Self {
        Self {
            name: name.into(),
            identity,
            immunity,
            permissions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identity(&self) -> AdminIdentity {
        self.identity
    }

    pub fn immunity(&self) -> u8 {
        self.immunity
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// concrete 권한 보유 여부 (대소문자 무시)
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(&CiString::new(permission.trim()))
    }

    /// 필요 권한 중 하나라도 있으면 true. 빈 목록은 false
    pub fn has_any_permission<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required
            .iter()
            .any(|permission| self.has_permission(permission.as_ref()))
    }

    /// 권한 직접 추가. Resolver를 다시 돌리지 않는다
    pub fn add_permission(&mut self, permission: &str) -> bool {
        let permission = permission.trim();
        if permission.is_empty() {
            return false;
        }
        self.permissions.insert(CiString::new(permission))
    }

    pub fn remove_permission(&mut self, permission: &str) -> bool {
        self.permissions.remove(&CiString::new(permission.trim()))
    }

    /// 재마운트 시 합집합 (immunity는 유지)
    pub fn extend(&mut self, permissions: PermissionSet) {
        self.permissions.extend(permissions);
    }

    /// 대상보다 immunity가 같거나 높으면 대상으로 삼을 수 있다
    pub fn can_target(&self, target: &Admin) -> bool {
        self.immunity >= target.immunity
    }
}
