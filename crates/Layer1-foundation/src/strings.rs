//! Case-insensitive String Utilities
//!
//! Module identities, role names, collection names and permissions are all
//! compared without regard to case. `CiString` keeps the spelling it was
//! created with (for display and serialization) and compares, hashes and
//! orders on a folded copy.
//!
//! # Usage
//!
//! ```ignore
//! use warden_foundation::strings::CiString;
//!
//! let a = CiString::new("pluginA:getWeapon");
//! let b = CiString::new("PLUGINA:GETWEAPON");
//! assert_eq!(a, b);
//! assert_eq!(a.as_str(), "pluginA:getWeapon");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 대소문자 무시 비교용 접기
pub fn fold(value: &str) -> String {
    value.to_lowercase()
}

/// 대소문자 무시 동등 비교
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || fold(a) == fold(b)
}

/// Case-insensitive owned string
#[derive(Clone)]
pub struct CiString {
    value: String,
    folded: String,
}

impl CiString {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let folded = fold(&value);
        Self { value, folded }
    }

    /// 원래 표기
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// 비교에 쓰이는 접힌 표기
    pub fn folded(&self) -> &str {
        &self.folded
    }

    pub fn into_string(self) -> String {
        self.value
    }

    /// `&str`과 대소문자 무시 비교 (할당 없이 빠른 경로 우선)
    pub fn eq_str(&self, other: &str) -> bool {
        self.value == other || self.folded == fold(other)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl PartialEq for CiString {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for CiString {}

impl Hash for CiString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl PartialOrd for CiString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CiString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded.cmp(&other.folded)
    }
}

impl fmt::Display for CiString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Debug for CiString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

impl From<&str> for CiString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CiString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&String> for CiString {
    fn from(value: &String) -> Self {
        Self::new(value.as_str())
    }
}

impl AsRef<str> for CiString {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl Serialize for CiString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de> Deserialize<'de> for CiString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}
