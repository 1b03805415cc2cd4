//! Admin Registry - 모듈별 관리자 목록

use super::record::Admin;
use crate::resolver::PermissionResolver;
use serde::Serialize;
use tracing::{debug, info};
use warden_foundation::{AdminIdentity, AdminManifest, CiString, PermissionRule};

/// 모듈 하나의 관리자 목록
#[derive(Debug, Clone, Serialize)]
pub struct ModuleAdmins {
    /// 모듈 identity
    pub module: CiString,

    /// 등록 순서대로의 관리자
    pub admins: Vec<Admin>,
}

/// 관리자 레지스트리 (모듈 마운트 순서 유지)
#[derive(Debug, Clone, Default)]
pub struct AdminRegistry {
    modules: Vec<ModuleAdmins>,
}

impl AdminRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Mount / Unmount
    // ========================================================================

    /// manifest의 관리자들을 해석해 모듈 목록에 반영.
    /// 같은 identity가 이미 있으면 권한만 합치고 immunity는 처음 값을 유지한다.
    /// 새로 만들어진 레코드 수를 반환
    pub fn process_admins(
        &mut self,
        module_id: &str,
        manifests: &[AdminManifest],
        resolver: &PermissionResolver<'_>,
    ) -> usize {
        let index = self.module_index_or_insert(module_id);
        let list = &mut self.modules[index].admins;
        let mut created = 0;

        for manifest in manifests {
            let rules = PermissionRule::parse_all(&manifest.permissions);
            let resolved = resolver.resolve(module_id, &rules);

            match list.iter_mut().find(|a| a.identity() == manifest.identity) {
                Some(existing) => {
                    if existing.immunity() != manifest.immunity {
                        debug!(
                            "Admin {} in {}: keeping immunity {} (manifest says {})",
                            manifest.identity,
                            module_id,
                            existing.immunity(),
                            manifest.immunity
                        );
                    }
                    existing.extend(resolved);
                }
                None => {
                    debug!(
                        "Registered admin {} ({}) in {} with {} permissions",
                        manifest.name,
                        manifest.identity,
                        module_id,
                        resolved.len()
                    );
                    list.push(Admin::new(
                        manifest.name.as_str(),
                        manifest.identity,
                        manifest.immunity,
                        resolved,
                    ));
                    created += 1;
                }
            }
        }

        created
    }

    /// 모듈 관리자 목록 전체 제거
    pub fn unmount(&mut self, module_id: &str) -> Option<ModuleAdmins> {
        let index = self.module_index(module_id)?;
        let removed = self.modules.remove(index);
        info!(
            "Dropped {} admin records of module {}",
            removed.admins.len(),
            removed.module
        );
        Some(removed)
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// 마운트 순서상 첫 모듈의 레코드
    pub fn get_admin(&self, identity: AdminIdentity) -> Option<&Admin> {
        self.modules
            .iter()
            .find_map(|m| m.admins.iter().find(|a| a.identity() == identity))
    }

    pub fn get_admin_mut(&mut self, identity: AdminIdentity) -> Option<&mut Admin> {
        self.modules
            .iter_mut()
            .find_map(|m| m.admins.iter_mut().find(|a| a.identity() == identity))
    }

    /// 특정 모듈의 레코드
    pub fn find(&self, module_id: &str, identity: AdminIdentity) -> Option<&Admin> {
        self.admins(module_id)?
            .iter()
            .find(|a| a.identity() == identity)
    }

    pub fn admins(&self, module_id: &str) -> Option<&[Admin]> {
        self.module_index(module_id)
            .map(|index| self.modules[index].admins.as_slice())
    }

    /// identity의 모든 모듈 레코드 (마운트 순서)
    pub fn records_for(&self, identity: AdminIdentity) -> Vec<(&CiString, &Admin)> {
        self.modules
            .iter()
            .filter_map(|m| {
                m.admins
                    .iter()
                    .find(|a| a.identity() == identity)
                    .map(|a| (&m.module, a))
            })
            .collect()
    }

    pub fn modules(&self) -> &[ModuleAdmins] {
        &self.modules
    }

    /// 전체 레코드 수
    pub fn len(&self) -> usize {
        self.modules.iter().map(|m| m.admins.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn module_index(&self, module_id: &str) -> Option<usize> {
        self.modules.iter().position(|m| m.module.eq_str(module_id))
    }

    fn module_index_or_insert(&mut self, module_id: &str) -> usize {
        match self.module_index(module_id) {
            Some(index) => index,
            None => {
                self.modules.push(ModuleAdmins {
                    module: CiString::new(module_id),
                    admins: Vec::new(),
                });
                self.modules.len() - 1
            }
        }
    }
}
