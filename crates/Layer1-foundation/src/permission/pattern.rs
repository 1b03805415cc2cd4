//! 권한 패턴 매칭
//!
//! - `*` 단독: 모든 권한
//! - 와일드카드 없음: 정확히 일치 (대소문자 무시)
//! - `a:*:c`: 세그먼트 수가 같고, `*`가 아닌 세그먼트가 모두 일치
//!
//! `*`는 세그먼트 하나 전체만 대신하며 세그먼트 경계를 넘지 않는다.

use super::rule::{SEPARATOR_OPERATOR, WILDCARD_OPERATOR};
use crate::strings::{fold, CiString};

/// 패턴 세그먼트
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// `*`
    Any,
    /// 접힌(lowercase) 리터럴
    Literal(String),
}

/// 파싱된 권한 패턴
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionPattern {
    /// `*` - 모든 concrete 권한
    Everything,

    /// 와일드카드 없는 concrete 권한
    Exact(CiString),

    /// 세그먼트 단위 와일드카드
    Segments(Vec<Segment>),
}

impl PermissionPattern {
    pub fn parse(pattern: &str) -> Self {
        if !pattern.contains(WILDCARD_OPERATOR) {
            return Self::Exact(CiString::new(pattern));
        }

        if pattern.len() == 1 {
            return Self::Everything;
        }

        Self::Segments(
            pattern
                .split(SEPARATOR_OPERATOR)
                .map(|segment| {
                    if segment.len() == 1 && segment.starts_with(WILDCARD_OPERATOR) {
                        Segment::Any
                    } else {
                        Segment::Literal(fold(segment))
                    }
                })
                .collect(),
        )
    }

    pub fn is_wildcard(&self) -> bool {
        !matches!(self, Self::Exact(_))
    }

    /// concrete 권한이 이 패턴에 매칭되는지 확인
    pub fn matches(&self, permission: &str) -> bool {
        match self {
            Self::Everything => true,
            Self::Exact(expected) => expected.eq_str(permission),
            Self::Segments(segments) => {
                let parts: Vec<&str> = permission.split(SEPARATOR_OPERATOR).collect();
                if parts.len() != segments.len() {
                    return false;
                }

                segments.iter().zip(parts).all(|(segment, part)| match segment {
                    Segment::Any => true,
                    Segment::Literal(literal) => *literal == fold(part),
                })
            }
        }
    }
}
