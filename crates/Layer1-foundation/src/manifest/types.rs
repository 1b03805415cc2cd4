//! Admin table manifest 타입
//!
//! ```jsonc
//! {
//!   "permissionCollections": {
//!     "pluginA": ["pluginA:getWeapon", "pluginA:fetchItems"],
//!     "pluginB": ["pluginB:kick", "pluginB:slay"]
//!   },
//!   "roles": [
//!     { "name": "global_root", "permissions": ["*"] },
//!     { "name": "pluginA_admin", "permissions": ["pluginA:*"] }
//!   ],
//!   "admins": [
//!     {
//!       "name": "u100",
//!       "identity": 76561198000000100,
//!       "immunity": 100,
//!       // all of global_root except slay
//!       "permissions": ["@global_root", "!pluginB:slay"]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 관리자 식별자 (안정적인 64bit 계정 키)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminIdentity(pub u64);

impl AdminIdentity {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for AdminIdentity {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for AdminIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 모듈 하나가 마운트하는 manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminTableManifest {
    /// 컬렉션 이름 -> concrete 권한 목록
    #[serde(default, alias = "permissionCollection")]
    pub permission_collections: BTreeMap<String, Vec<String>>,

    /// role 정의
    #[serde(default)]
    pub roles: Vec<RoleManifest>,

    /// 관리자 정의
    #[serde(default)]
    pub admins: Vec<AdminManifest>,
}

/// Role 정의 (권한 규칙 문자열 목록)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleManifest {
    pub name: String,

    #[serde(default)]
    pub permissions: Vec<String>,
}

/// 관리자 정의
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminManifest {
    pub name: String,

    pub identity: AdminIdentity,

    #[serde(default)]
    pub immunity: u8,

    #[serde(default)]
    pub permissions: Vec<String>,
}

impl AdminTableManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection<I, S>(mut self, name: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permission_collections
            .insert(name.into(), permissions.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_role<I, S>(mut self, name: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.push(RoleManifest::new(name, rules));
        self
    }

    pub fn with_admin(mut self, admin: AdminManifest) -> Self {
        self.admins.push(admin);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.permission_collections.is_empty() && self.roles.is_empty() && self.admins.is_empty()
    }
}

impl RoleManifest {
    pub fn new<I, S>(name: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            permissions: rules.into_iter().map(Into::into).collect(),
        }
    }
}

impl AdminManifest {
    pub fn new(name: impl Into<String>, identity: impl Into<AdminIdentity>) -> Self {
        Self {
            name: name.into(),
            identity: identity.into(),
            immunity: 0,
            permissions: Vec::new(),
        }
    }

    pub fn immunity(mut self, immunity: u8) -> Self {
        self.immunity = immunity;
        self
    }

    pub fn rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = rules.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let manifest = AdminTableManifest::new()
            .with_collection("pluginA", ["pluginA:getWeapon"])
            .with_role("pluginA_admin", ["pluginA:*"])
            .with_admin(
                AdminManifest::new("u104", 104)
                    .immunity(10)
                    .rules(["@pluginA_admin"]),
            );

        assert!(!manifest.is_empty());
        assert_eq!(manifest.roles[0].permissions, vec!["pluginA:*"]);
        assert_eq!(manifest.admins[0].identity, AdminIdentity(104));
        assert_eq!(manifest.admins[0].immunity, 10);
    }

    #[test]
    fn test_sections_default_to_empty() {
        let manifest: AdminTableManifest = serde_json::from_str("{}").unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_singular_collection_alias() {
        let manifest: AdminTableManifest =
            serde_json::from_str(r#"{ "permissionCollection": { "a": ["a:b"] } }"#).unwrap();
        assert_eq!(manifest.permission_collections["a"], vec!["a:b"]);
    }
}
