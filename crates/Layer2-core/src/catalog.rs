//! Module Catalog - 모듈별 컬렉션/role 저장소
//!
//! 모듈 identity(대소문자 무시)마다 permission collection과 role을 가진다.
//! 같은 모듈에 manifest를 여러 번 마운트하면 이름 단위로 병합되고,
//! 같은 이름은 나중 것이 덮어쓴다.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;
use warden_foundation::{CiString, PermissionRule, PermissionUniverse, RoleManifest};

/// 이름 붙은 권한 규칙 집합 (해석하지 않은 채 보관)
#[derive(Debug, Clone, Serialize)]
pub struct Role {
    name: CiString,
    rules: Vec<PermissionRule>,
}

impl Role {
    pub fn new(name: impl Into<CiString>, rules: Vec<PermissionRule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    pub fn from_manifest(manifest: &RoleManifest) -> Self {
        Self::new(
            manifest.name.as_str(),
            PermissionRule::parse_all(&manifest.permissions),
        )
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn rules(&self) -> &[PermissionRule] {
        &self.rules
    }
}

/// 모듈 하나의 카탈로그 항목
#[derive(Debug, Clone, Default)]
pub struct ModuleEntry {
    /// 컬렉션 이름 -> concrete 권한
    collections: BTreeMap<CiString, Vec<String>>,

    /// role 이름 -> Role
    roles: BTreeMap<CiString, Role>,
}

impl ModuleEntry {
    pub fn collection(&self, name: &str) -> Option<&[String]> {
        self.collections
            .get(&CiString::new(name))
            .map(|permissions| permissions.as_slice())
    }

    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.get(&CiString::new(name))
    }

    pub fn collections(&self) -> impl Iterator<Item = (&CiString, &Vec<String>)> {
        self.collections.iter()
    }

    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }

    /// 모든 컬렉션의 권한 (중복 포함)
    pub fn concrete_permissions(&self) -> impl Iterator<Item = &str> {
        self.collections
            .values()
            .flat_map(|permissions| permissions.iter().map(String::as_str))
    }
}

/// 모듈 카탈로그
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    modules: HashMap<CiString, ModuleEntry>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 컬렉션과 role 마운트. 컬렉션 멤버는 universe에도 추가
    pub fn mount(
        &mut self,
        module_id: &str,
        collections: &BTreeMap<String, Vec<String>>,
        roles: &[RoleManifest],
        universe: &mut PermissionUniverse,
    ) {
        let entry = self.modules.entry(CiString::new(module_id)).or_default();

        for (name, permissions) in collections {
            let added = universe.add_permissions(permissions);
            entry
                .collections
                .insert(CiString::new(name.as_str()), permissions.clone());
            debug!(
                "Mounted collection {}/{} ({} permissions, {} new in universe)",
                module_id,
                name,
                permissions.len(),
                added
            );
        }

        for manifest in roles {
            let role = Role::from_manifest(manifest);
            debug!(
                "Mounted role {}/@{} ({} rules)",
                module_id,
                role.name(),
                role.rules().len()
            );
            entry.roles.insert(CiString::new(manifest.name.as_str()), role);
        }
    }

    /// 모듈 항목 전체 제거. universe 정리는 호출자 책임
    pub fn unmount(&mut self, module_id: &str) -> Option<ModuleEntry> {
        self.modules.remove(&CiString::new(module_id))
    }

    /// 해당 모듈의 role 조회
    pub fn find_role(&self, module_id: &str, name: &str) -> Option<&Role> {
        self.module(module_id)?.role(name)
    }

    pub fn module(&self, module_id: &str) -> Option<&ModuleEntry> {
        self.modules.get(&CiString::new(module_id))
    }

    pub fn contains(&self, module_id: &str) -> bool {
        self.modules.contains_key(&CiString::new(module_id))
    }

    pub fn module_ids(&self) -> impl Iterator<Item = &CiString> {
        self.modules.keys()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collections(pairs: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(name, perms)| {
                (
                    name.to_string(),
                    perms.iter().map(|p| p.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_mount_feeds_universe() {
        let mut catalog = ModuleCatalog::new();
        let mut universe = PermissionUniverse::new();

        catalog.mount(
            "pluginA",
            &collections(&[("pluginA", &["pluginA:getWeapon", "pluginA:fetchItems"])]),
            &[RoleManifest::new("pluginA_admin", ["pluginA:*"])],
            &mut universe,
        );

        assert_eq!(universe.len(), 2);
        assert!(catalog.contains("PLUGINA"));
        let role = catalog.find_role("pluginA", "PLUGINA_ADMIN").unwrap();
        assert_eq!(role.rules(), &[PermissionRule::Grant("pluginA:*".into())]);
    }

    #[test]
    fn test_remount_overwrites_by_name() {
        let mut catalog = ModuleCatalog::new();
        let mut universe = PermissionUniverse::new();

        catalog.mount(
            "m",
            &collections(&[("c", &["m:a"])]),
            &[RoleManifest::new("r", ["m:a"])],
            &mut universe,
        );
        catalog.mount(
            "M",
            &collections(&[("C", &["m:b"]), ("other", &["m:c"])]),
            &[RoleManifest::new("R", ["!m:a"])],
            &mut universe,
        );

        let entry = catalog.module("m").unwrap();
        assert_eq!(entry.collection("c").unwrap(), ["m:b".to_string()]);
        assert_eq!(entry.collections().count(), 2);
        assert_eq!(
            catalog.find_role("m", "r").unwrap().rules(),
            &[PermissionRule::Deny("m:a".into())]
        );
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_roles_are_namespaced_by_module() {
        let mut catalog = ModuleCatalog::new();
        let mut universe = PermissionUniverse::new();

        catalog.mount(
            "a",
            &BTreeMap::new(),
            &[RoleManifest::new("root", ["*"])],
            &mut universe,
        );

        assert!(catalog.find_role("a", "root").is_some());
        assert!(catalog.find_role("b", "root").is_none());
    }

    #[test]
    fn test_unmount_returns_entry() {
        let mut catalog = ModuleCatalog::new();
        let mut universe = PermissionUniverse::new();
        catalog.mount(
            "a",
            &collections(&[("c", &["a:x", "a:y"])]),
            &[],
            &mut universe,
        );

        let entry = catalog.unmount("A").unwrap();
        assert_eq!(entry.concrete_permissions().count(), 2);
        assert!(catalog.unmount("a").is_none());
        assert!(catalog.is_empty());
    }
}
