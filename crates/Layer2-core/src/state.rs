//! Engine State - Universe + Catalog + Admin Registry
//!
//! 세 저장소는 항상 함께 변경된다. 호스트가 멀티스레드라면 하나의
//! `RwLock<EngineState>` 뒤에 두고 mount/unmount는 write, 조회는 read로 다룬다.

use crate::admin::{Admin, AdminRegistry};
use crate::catalog::ModuleCatalog;
use crate::resolver::PermissionResolver;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;
use warden_foundation::{AdminIdentity, AdminTableManifest, PermissionSet, PermissionUniverse};

/// 권한 엔진 상태
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    universe: PermissionUniverse,
    catalog: ModuleCatalog,
    admins: AdminRegistry,
}

/// 마운트 결과 요약
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MountSummary {
    pub collections: usize,
    pub roles: usize,
    pub admins_created: usize,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn universe(&self) -> &PermissionUniverse {
        &self.universe
    }

    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    pub fn admins(&self) -> &AdminRegistry {
        &self.admins
    }

    pub fn admins_mut(&mut self) -> &mut AdminRegistry {
        &mut self.admins
    }

    pub fn resolver(&self) -> PermissionResolver<'_> {
        PermissionResolver::new(&self.catalog, &self.universe)
    }

    // ========================================================================
    // Mount / Unmount
    // ========================================================================

    /// 컬렉션 → universe/카탈로그, role → 카탈로그, 마지막으로 관리자 해석.
    /// 관리자는 이번 마운트까지 반영된 universe 기준으로 해석된다.
    pub fn mount(&mut self, module_id: &str, manifest: &AdminTableManifest) -> MountSummary {
        self.catalog.mount(
            module_id,
            &manifest.permission_collections,
            &manifest.roles,
            &mut self.universe,
        );

        let resolver = PermissionResolver::new(&self.catalog, &self.universe);
        let admins_created = self
            .admins
            .process_admins(module_id, &manifest.admins, &resolver);

        MountSummary {
            collections: manifest.permission_collections.len(),
            roles: manifest.roles.len(),
            admins_created,
        }
    }

    /// 모듈 제거: 카탈로그 항목, 해당 모듈의 concrete 권한, 관리자 목록.
    /// 마운트된 적 없는 모듈이면 false (no-op)
    pub fn unmount(&mut self, module_id: &str) -> bool {
        let entry = self.catalog.unmount(module_id);
        let admins = self.admins.unmount(module_id);

        if let Some(entry) = &entry {
            let removed = self
                .universe
                .remove_permissions(entry.concrete_permissions());
            debug!(
                "Removed {} permissions of module {} from universe",
                removed, module_id
            );
        }

        entry.is_some() || admins.is_some()
    }

    pub fn is_mounted(&self, module_id: &str) -> bool {
        self.catalog.contains(module_id)
            || self.admins.admins(module_id).is_some()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn get_admin(&self, identity: AdminIdentity) -> Option<&Admin> {
        self.admins.get_admin(identity)
    }

    pub fn resolve<S: AsRef<str>>(&self, module_id: &str, rules: &[S]) -> PermissionSet {
        self.resolver().resolve_strs(module_id, rules)
    }

    /// 직렬화 가능한 상태 덤프 (모듈 이름순)
    pub fn snapshot(&self) -> EngineSnapshot {
        let mut modules: BTreeMap<String, ModuleSnapshot> = BTreeMap::new();

        for id in self.catalog.module_ids() {
            let snapshot = modules.entry(id.folded().to_string()).or_insert_with(|| {
                ModuleSnapshot::empty(id.as_str())
            });
            if let Some(entry) = self.catalog.module(id.as_str()) {
                snapshot.collections = entry
                    .collections()
                    .map(|(name, permissions)| (name.to_string(), permissions.clone()))
                    .collect();
                snapshot.roles = entry
                    .roles()
                    .map(|role| {
                        (
                            role.name().to_string(),
                            role.rules().iter().map(ToString::to_string).collect(),
                        )
                    })
                    .collect();
            }
        }

        for module in self.admins.modules() {
            let snapshot = modules
                .entry(module.module.folded().to_string())
                .or_insert_with(|| ModuleSnapshot::empty(module.module.as_str()));
            snapshot.admins = module.admins.clone();
        }

        let mut universe: Vec<String> = self
            .universe
            .all_concrete()
            .map(|p| p.to_string())
            .collect();
        universe.sort_by_key(|p| p.to_lowercase());

        EngineSnapshot {
            modules: modules.into_values().collect(),
            universe,
        }
    }
}

/// 엔진 상태 스냅샷
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    pub modules: Vec<ModuleSnapshot>,
    pub universe: Vec<String>,
}

/// 모듈 하나의 스냅샷
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSnapshot {
    pub module: String,
    pub collections: BTreeMap<String, Vec<String>>,
    pub roles: BTreeMap<String, Vec<String>>,
    pub admins: Vec<Admin>,
}

impl ModuleSnapshot {
    fn empty(module: &str) -> Self {
        Self {
            module: module.to_string(),
            collections: BTreeMap::new(),
            roles: BTreeMap::new(),
            admins: Vec::new(),
        }
    }
}
