//! Permission rule grammar
//!
//! ```text
//! !pattern    deny
//! @roleName   role reference
//! pattern     grant
//! ```
//!
//! 규칙 문자열은 한 번만 파싱하고 이후에는 variant로만 다룬다.

use serde::{Serialize, Serializer};
use std::fmt;

/// Role 참조 접두사
pub const ROLES_OPERATOR: char = '@';
/// 거부 접두사
pub const DENY_OPERATOR: char = '!';
/// 와일드카드 세그먼트
pub const WILDCARD_OPERATOR: char = '*';
/// 세그먼트 구분자
pub const SEPARATOR_OPERATOR: char = ':';

/// 파싱된 권한 규칙
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PermissionRule {
    /// 패턴에 매칭되는 권한 허용
    Grant(String),

    /// 패턴에 매칭되는 권한 거부 (항상 허용보다 우선)
    Deny(String),

    /// 같은 모듈의 role 상속
    RoleRef(String),
}

impl PermissionRule {
    /// Parse one rule string.
    ///
    /// Returns `None` for empty or whitespace-only input; such rules are
    /// skipped rather than rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let rule = raw.trim();
        if rule.is_empty() {
            return None;
        }

        if let Some(pattern) = rule.strip_prefix(DENY_OPERATOR) {
            Some(Self::Deny(pattern.to_string()))
        } else if let Some(role) = rule.strip_prefix(ROLES_OPERATOR) {
            Some(Self::RoleRef(role.to_string()))
        } else {
            Some(Self::Grant(rule.to_string()))
        }
    }

    /// 여러 규칙 파싱 (빈 규칙은 건너뜀)
    pub fn parse_all<I, S>(rules: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        rules
            .into_iter()
            .filter_map(|rule| Self::parse(rule.as_ref()))
            .collect()
    }

    /// Grant/Deny의 패턴
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::Grant(pattern) | Self::Deny(pattern) => Some(pattern),
            Self::RoleRef(_) => None,
        }
    }

    /// RoleRef의 role 이름
    pub fn role_name(&self) -> Option<&str> {
        match self {
            Self::RoleRef(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_deny(&self) -> bool {
        matches!(self, Self::Deny(_))
    }
}

impl fmt::Display for PermissionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grant(pattern) => f.write_str(pattern),
            Self::Deny(pattern) => write!(f, "{}{}", DENY_OPERATOR, pattern),
            Self::RoleRef(name) => write!(f, "{}{}", ROLES_OPERATOR, name),
        }
    }
}

impl Serialize for PermissionRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!(
            PermissionRule::parse("pluginA:getWeapon"),
            Some(PermissionRule::Grant("pluginA:getWeapon".into()))
        );
        assert_eq!(
            PermissionRule::parse("!pluginB:slay"),
            Some(PermissionRule::Deny("pluginB:slay".into()))
        );
        assert_eq!(
            PermissionRule::parse("@global_root"),
            Some(PermissionRule::RoleRef("global_root".into()))
        );
    }

    #[test]
    fn test_parse_trims_and_skips_blank() {
        assert_eq!(PermissionRule::parse(""), None);
        assert_eq!(PermissionRule::parse("   \t"), None);
        assert_eq!(
            PermissionRule::parse("  !pluginA:*  "),
            Some(PermissionRule::Deny("pluginA:*".into()))
        );

        let rules = PermissionRule::parse_all(["*", " ", "@admin"]);
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn test_deny_of_role_is_a_literal_pattern() {
        // `!@role` is not a role denial; it denies the literal pattern "@role"
        let rule = PermissionRule::parse("!@pluginA_admin").unwrap();
        assert_eq!(rule, PermissionRule::Deny("@pluginA_admin".into()));
        assert_eq!(rule.role_name(), None);
    }

    #[test]
    fn test_display_round_trip() {
        for raw in ["pluginA:*", "!pluginB:kick", "@root"] {
            assert_eq!(PermissionRule::parse(raw).unwrap().to_string(), raw);
        }
    }
}
