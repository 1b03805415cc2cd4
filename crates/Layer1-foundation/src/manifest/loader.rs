//! Manifest 로더 (JSONC)

use super::types::AdminTableManifest;
use crate::storage::{parse_jsonc, read_jsonc};
use crate::{Error, Result};
use std::path::Path;
use tracing::debug;

/// 기본 manifest 파일명
pub const DEFAULT_MANIFEST_FILE: &str = "admin.jsonc";

/// 문자열에서 manifest 파싱 (주석, trailing comma 허용)
pub fn parse_manifest(content: &str) -> Result<AdminTableManifest> {
    parse_jsonc(content).map_err(|e| Error::Manifest(e.to_string()))
}

/// 파일에서 manifest 로드. 파일이 없으면 `Error::NotFound`
pub fn load_manifest(path: &Path) -> Result<AdminTableManifest> {
    load_manifest_optional(path)?.ok_or_else(|| Error::missing(path))
}

/// 파일이 없으면 `None`
pub fn load_manifest_optional(path: &Path) -> Result<Option<AdminTableManifest>> {
    let manifest: Option<AdminTableManifest> = read_jsonc(path, |p, e| Error::manifest(p, e))?;

    if let Some(manifest) = &manifest {
        debug!(
            "Loaded manifest from {}: {} collections, {} roles, {} admins",
            path.display(),
            manifest.permission_collections.len(),
            manifest.roles.len(),
            manifest.admins.len()
        );
    }

    Ok(manifest)
}
