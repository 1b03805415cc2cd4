//! Permission system for Warden
//!
//! - `rule`: 규칙 문법 (`!deny`, `@role`, grant) → `PermissionRule`
//! - `pattern`: 세그먼트 와일드카드 매칭 → `PermissionPattern`
//! - `universe`: 모든 모듈이 기여한 concrete 권한 집합 → `PermissionUniverse`
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use warden_foundation::permission::{PermissionPattern, PermissionRule, PermissionUniverse};
//!
//! let mut universe = PermissionUniverse::new();
//! universe.add_permissions(["pluginA:getWeapon", "pluginA:fetchItems"]);
//!
//! let rule = PermissionRule::parse("pluginA:*").unwrap();
//! let matched = universe.matching(&PermissionPattern::parse(rule.pattern().unwrap()));
//! assert_eq!(matched.len(), 2);
//! ```

mod pattern;
mod rule;
mod universe;

pub use pattern::{PermissionPattern, Segment};
pub use rule::{
    PermissionRule, DENY_OPERATOR, ROLES_OPERATOR, SEPARATOR_OPERATOR, WILDCARD_OPERATOR,
};
pub use universe::{PermissionSet, PermissionUniverse};
