//! # warden-foundation
//!
//! Foundation layer for Warden:
//! - Error: 중앙 에러 타입
//! - Strings: 대소문자 무시 키 (`CiString`)
//! - Permission: 규칙 문법, 와일드카드 패턴, Permission Universe
//! - Manifest: admin table manifest 타입 + JSONC 로더
//! - Storage: JSONC 읽기 경로 + scope별 설정 폴더 (JsonStore)
//! - Config: 통합 설정 (WardenConfig)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Module manifest (admin.jsonc)                          │
//! │    collections ─────────► Permission Universe (global)  │
//! │    roles ───────────────► Module Catalog (per module)   │
//! │    admins ──► Resolver ─► Admin Registry (per module)   │
//! │                                  │                      │
//! │                                  ▼                      │
//! │                        Access Controller (dispatch)     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! 이 crate는 상태 없는 빌딩 블록만 제공하고, 카탈로그/레지스트리는
//! `warden-core`가 소유한다.

pub mod config;
pub mod error;
pub mod manifest;
pub mod permission;
pub mod storage;
pub mod strings;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Strings (대소문자 무시)
// ============================================================================
pub use strings::CiString;

// ============================================================================
// Permission (권한 문법 + Universe)
// ============================================================================
pub use permission::{
    PermissionPattern, PermissionRule, PermissionSet, PermissionUniverse, Segment,
    DENY_OPERATOR, ROLES_OPERATOR, SEPARATOR_OPERATOR, WILDCARD_OPERATOR,
};

// ============================================================================
// Manifest
// ============================================================================
pub use manifest::{
    load_manifest, load_manifest_optional, parse_manifest, AdminIdentity, AdminManifest,
    AdminTableManifest, RoleManifest, DEFAULT_MANIFEST_FILE,
};

// ============================================================================
// Storage / Config
// ============================================================================
pub use config::{WardenConfig, DEFAULT_ACCESS_DENIED_MESSAGE, WARDEN_CONFIG_FILE};
pub use storage::{parse_jsonc, read_jsonc, strip_json_comments, ConfigScope, JsonStore};
