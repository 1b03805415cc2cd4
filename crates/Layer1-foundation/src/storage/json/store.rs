//! JSONC 파일 읽기/쓰기
//!
//! manifest와 설정 파일이 같은 읽기 경로(`read_jsonc`)를 쓴다.
//! 파일이 없으면 `None`, 파싱 실패는 호출자가 고른 경로 포함 에러로 바뀐다.

use super::jsonc::parse_jsonc;
use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 글로벌/프로젝트 설정 폴더 이름
pub const APP_DIR_NAME: &str = "warden";

/// JSONC 파일 하나 읽기. 없으면 `None`
pub fn read_jsonc<T, F>(path: &Path, invalid: F) -> Result<Option<T>>
where
    T: DeserializeOwned,
    F: FnOnce(&Path, serde_json::Error) -> Error,
{
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    parse_jsonc(&content)
        .map(Some)
        .map_err(|e| invalid(path, e))
}

/// 설정 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// `<config_dir>/warden/`
    Global,
    /// `<project>/.warden/`
    Project,
}

/// 한 scope의 설정 폴더
#[derive(Debug, Clone)]
pub struct JsonStore {
    scope: ConfigScope,
    dir: PathBuf,
}

impl JsonStore {
    pub fn global() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("no platform config directory".to_string()))?;
        Ok(Self {
            scope: ConfigScope::Global,
            dir: dir.join(APP_DIR_NAME),
        })
    }

    pub fn project(root: &Path) -> Self {
        Self {
            scope: ConfigScope::Project,
            dir: root.join(format!(".{}", APP_DIR_NAME)),
        }
    }

    pub fn current_project() -> Result<Self> {
        Ok(Self::project(&std::env::current_dir()?))
    }

    pub fn scope(&self) -> ConfigScope {
        self.scope
    }

    /// 설정 파일 로드. 없으면 `None`, 깨졌으면 `Error::Config`
    pub fn load_optional<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>> {
        read_jsonc(&self.dir.join(file), |path, e| Error::config(path, e))
    }

    /// pretty JSON으로 저장하고 경로 반환. 폴더가 없으면 만든다
    pub fn save<T: Serialize>(&self, file: &str, value: &T) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(file);
        let mut json = serde_json::to_string_pretty(value).map_err(|e| Error::config(&path, e))?;
        json.push('\n');
        std::fs::write(&path, json)?;
        Ok(path)
    }
}
