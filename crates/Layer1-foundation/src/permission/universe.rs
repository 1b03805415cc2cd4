//! Permission Universe
//!
//! 모든 모듈이 기여한 concrete 권한의 전역 집합. 와일드카드 확장의 기준이 된다.
//! 모듈별 참조 카운트가 없으므로, 한 모듈의 권한을 제거하면 다른 모듈이 같은
//! 철자로 등록한 권한도 함께 사라진다.

use super::pattern::PermissionPattern;
use super::rule::WILDCARD_OPERATOR;
use crate::strings::CiString;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// 해석된 concrete 권한 집합 (정렬, 대소문자 무시)
pub type PermissionSet = BTreeSet<CiString>;

/// 전역 concrete 권한 집합
#[derive(Debug, Clone, Default)]
pub struct PermissionUniverse {
    permissions: HashSet<CiString>,
}

impl PermissionUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// 권한 하나 추가. 빈 문자열과 와일드카드를 포함한 항목은 concrete가 아니므로 무시
    pub fn add(&mut self, permission: &str) -> bool {
        let permission = permission.trim();
        if permission.is_empty() || permission.contains(WILDCARD_OPERATOR) {
            debug!("Ignoring non-concrete permission '{}'", permission);
            return false;
        }
        self.permissions.insert(CiString::new(permission))
    }

    /// 합집합. 새로 추가된 개수 반환
    pub fn add_permissions<I, S>(&mut self, permissions: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        permissions
            .into_iter()
            .filter(|permission| self.add(permission.as_ref()))
            .count()
    }

    /// 차집합. 실제로 제거된 개수 반환
    pub fn remove_permissions<I, S>(&mut self, permissions: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        permissions
            .into_iter()
            .filter(|permission| {
                self.permissions
                    .remove(&CiString::new(permission.as_ref().trim()))
            })
            .count()
    }

    pub fn contains(&self, permission: &str) -> bool {
        self.permissions.contains(&CiString::new(permission))
    }

    /// 모든 concrete 권한
    pub fn all_concrete(&self) -> impl Iterator<Item = &CiString> {
        self.permissions.iter()
    }

    /// 패턴에 매칭되는 권한들 (등록된 철자로 반환)
    pub fn matching(&self, pattern: &PermissionPattern) -> PermissionSet {
        match pattern {
            PermissionPattern::Everything => self.permissions.iter().cloned().collect(),
            PermissionPattern::Exact(permission) => {
                self.permissions.get(permission).cloned().into_iter().collect()
            }
            PermissionPattern::Segments(_) => self
                .permissions
                .iter()
                .filter(|permission| pattern.matches(permission.as_str()))
                .cloned()
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe() -> PermissionUniverse {
        let mut universe = PermissionUniverse::new();
        universe.add_permissions([
            "system:role:create",
            "system:role:delete",
            "pluginA:getWeapon",
            "pluginA:fetchItems",
            "pluginB:kick",
            "pluginB:slay",
        ]);
        universe
    }

    #[test]
    fn test_add_is_union() {
        let mut universe = universe();
        assert_eq!(universe.len(), 6);
        assert_eq!(universe.add_permissions(["PLUGINB:KICK", "pluginC:mute"]), 1);
        assert_eq!(universe.len(), 7);
        assert!(universe.contains("pluginc:MUTE"));
    }

    #[test]
    fn test_wildcards_and_blank_never_enter() {
        let mut universe = PermissionUniverse::new();
        assert_eq!(universe.add_permissions(["*", "pluginA:*", "", "  "]), 0);
        assert!(universe.is_empty());
    }

    #[test]
    fn test_remove_is_difference() {
        let mut universe = universe();
        assert_eq!(universe.remove_permissions(["pluginB:kick", "unknown:perm"]), 1);
        assert!(!universe.contains("pluginB:kick"));
        assert_eq!(universe.len(), 5);
    }

    #[test]
    fn test_matching_everything_returns_whole_universe() {
        let universe = universe();
        let all = universe.matching(&PermissionPattern::Everything);
        assert_eq!(all.len(), universe.len());
    }

    #[test]
    fn test_matching_exact_requires_presence() {
        let universe = universe();
        let found = universe.matching(&PermissionPattern::parse("PLUGINA:GETWEAPON"));
        assert_eq!(found.len(), 1);
        assert_eq!(found.iter().next().unwrap().as_str(), "pluginA:getWeapon");

        assert!(universe
            .matching(&PermissionPattern::parse("pluginA:unknown"))
            .is_empty());
    }

    #[test]
    fn test_matching_segments() {
        let universe = universe();
        let found = universe.matching(&PermissionPattern::parse("system:*:delete"));
        assert_eq!(found.len(), 1);
        assert!(found.contains(&CiString::new("system:role:delete")));

        let plugin_a = universe.matching(&PermissionPattern::parse("pluginA:*"));
        assert_eq!(plugin_a.len(), 2);
    }
}
