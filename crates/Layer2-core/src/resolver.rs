//! Permission Resolver
//!
//! 한 모듈의 카탈로그 범위에서 규칙 목록을 concrete 권한 집합으로 확장한다.
//!
//! ```text
//! allowed = ⋃ Grant(pattern) ∪ ⋃ resolve(@role)
//! denied  = ⋃ Deny(pattern)
//! result  = allowed − denied        (규칙 순서와 무관, 마지막에 한 번만 적용)
//! ```
//!
//! - 알 수 없는 role, 매칭 없는 패턴은 빈 기여일 뿐 에러가 아니다.
//! - role 참조는 같은 모듈의 role 테이블에서만 찾는다.
//! - 현재 확장 경로에 이미 있는 role은 건너뛴다 (순환 방지).

use crate::catalog::ModuleCatalog;
use std::collections::HashSet;
use tracing::{debug, warn};
use warden_foundation::{
    CiString, PermissionPattern, PermissionRule, PermissionSet, PermissionUniverse,
};

/// 카탈로그 + universe를 빌려 쓰는 해석기 (상태 없음)
#[derive(Debug, Clone, Copy)]
pub struct PermissionResolver<'a> {
    catalog: &'a ModuleCatalog,
    universe: &'a PermissionUniverse,
}

impl<'a> PermissionResolver<'a> {
    pub fn new(catalog: &'a ModuleCatalog, universe: &'a PermissionUniverse) -> Self {
        Self { catalog, universe }
    }

    /// 파싱된 규칙 해석
    pub fn resolve(&self, module_id: &str, rules: &[PermissionRule]) -> PermissionSet {
        self.resolve_with(module_id, rules, &HashSet::new())
    }

    /// 규칙 문자열 해석 (빈 문자열은 무시)
    pub fn resolve_strs<S: AsRef<str>>(&self, module_id: &str, rules: &[S]) -> PermissionSet {
        self.resolve(module_id, &PermissionRule::parse_all(rules))
    }

    /// `visiting`: 현재 확장 경로에 있는 role 이름들
    pub fn resolve_with(
        &self,
        module_id: &str,
        rules: &[PermissionRule],
        visiting: &HashSet<CiString>,
    ) -> PermissionSet {
        let mut allowed = PermissionSet::new();
        let mut denied = PermissionSet::new();

        for rule in rules {
            match rule {
                PermissionRule::Deny(pattern) => {
                    denied.extend(self.match_pattern(pattern));
                }
                PermissionRule::RoleRef(name) => {
                    let key = CiString::new(name.as_str());
                    if visiting.contains(&key) {
                        warn!(
                            "Role cycle detected in module {}: @{} is already being expanded, skipping",
                            module_id, name
                        );
                        continue;
                    }

                    match self.catalog.find_role(module_id, name) {
                        Some(role) => {
                            let mut path = visiting.clone();
                            path.insert(key);
                            allowed.extend(self.resolve_with(module_id, role.rules(), &path));
                        }
                        None => {
                            debug!("Unknown role @{} in module {}", name, module_id);
                        }
                    }
                }
                PermissionRule::Grant(pattern) => {
                    allowed.extend(self.match_pattern(pattern));
                }
            }
        }

        // 거부가 항상 우선
        allowed.retain(|permission| !denied.contains(permission));
        allowed
    }

    /// 패턴 확장 (universe 기준)
    pub fn match_pattern(&self, pattern: &str) -> PermissionSet {
        self.universe.matching(&PermissionPattern::parse(pattern))
    }
}
