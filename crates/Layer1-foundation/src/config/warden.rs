//! Warden Config - 통합 설정
//!
//! 글로벌(`<config_dir>/warden/warden.json`) → 프로젝트(`.warden/warden.json`)
//! 순서로 병합한다. 파일이 없으면 기본값.

use crate::manifest::DEFAULT_MANIFEST_FILE;
use crate::storage::{read_jsonc, JsonStore};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 설정 파일명
pub const WARDEN_CONFIG_FILE: &str = "warden.json";

/// 권한 없는 명령 실행 시 보내는 기본 메시지
pub const DEFAULT_ACCESS_DENIED_MESSAGE: &str = "[MS] You do not have access to do this command.";

/// Warden 통합 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardenConfig {
    /// 기본 manifest 파일명
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,

    /// manifest 디렉토리 (없으면 `<root>/configs`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_dir: Option<PathBuf>,

    /// 접근 거부 메시지
    #[serde(default = "default_access_denied_message")]
    pub access_denied_message: String,

    /// 콘솔 호출자 표시 이름 (로그용)
    #[serde(default = "default_console_identity")]
    pub console_identity: String,
}

fn default_manifest_file() -> String {
    DEFAULT_MANIFEST_FILE.to_string()
}

fn default_access_denied_message() -> String {
    DEFAULT_ACCESS_DENIED_MESSAGE.to_string()
}

fn default_console_identity() -> String {
    "console".to_string()
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            manifest_file: default_manifest_file(),
            manifest_dir: None,
            access_denied_message: default_access_denied_message(),
            console_identity: default_console_identity(),
        }
    }
}

impl WardenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 글로벌 + 프로젝트 병합 로드
    pub fn load() -> Result<Self> {
        let mut config = Self::new();

        // 1. 글로벌 설정
        if let Ok(global) = JsonStore::global() {
            if let Some(global_config) = global.load_optional::<WardenConfig>(WARDEN_CONFIG_FILE)? {
                config.merge(global_config);
            }
        }

        // 2. 프로젝트 설정
        if let Ok(project) = JsonStore::current_project() {
            if let Some(project_config) =
                project.load_optional::<WardenConfig>(WARDEN_CONFIG_FILE)?
            {
                config.merge(project_config);
            }
        }

        Ok(config)
    }

    /// 특정 파일에서 로드 (없으면 기본값)
    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(read_jsonc(path, |p, e| Error::config(p, e))?.unwrap_or_default())
    }

    /// 프로젝트 설정 저장 (`.warden/warden.json`), 저장 경로 반환
    pub fn save_project(&self) -> Result<PathBuf> {
        JsonStore::current_project()?.save(WARDEN_CONFIG_FILE, self)
    }

    /// 병합 (other 우선, 기본값이면 유지)
    pub fn merge(&mut self, other: WardenConfig) {
        if other.manifest_file != DEFAULT_MANIFEST_FILE {
            self.manifest_file = other.manifest_file;
        }
        if other.manifest_dir.is_some() {
            self.manifest_dir = other.manifest_dir;
        }
        if other.access_denied_message != DEFAULT_ACCESS_DENIED_MESSAGE {
            self.access_denied_message = other.access_denied_message;
        }
        if other.console_identity != default_console_identity() {
            self.console_identity = other.console_identity;
        }
    }

    /// 기본 manifest 경로 (`<root>/configs/<manifestFile>` 또는 `manifestDir` 기준)
    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        let dir = self
            .manifest_dir
            .clone()
            .unwrap_or_else(|| root.join("configs"));
        dir.join(&self.manifest_file)
    }
}
