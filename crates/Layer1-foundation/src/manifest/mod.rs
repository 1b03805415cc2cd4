//! Admin table manifest
//!
//! - `types`: manifest 구조 (`AdminTableManifest`, `RoleManifest`, `AdminManifest`)
//! - `loader`: JSONC 파일/문자열 로드

mod loader;
mod types;

pub use loader::{load_manifest, load_manifest_optional, parse_manifest, DEFAULT_MANIFEST_FILE};
pub use types::{AdminIdentity, AdminManifest, AdminTableManifest, RoleManifest};
