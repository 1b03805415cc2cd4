//! Error types for Warden
//!
//! 모든 에러를 중앙에서 관리
//!
//! 권한 판정 결과(거부, 알 수 없는 role, 매칭 실패)는 에러가 아니다.
//! 여기 있는 에러는 manifest/설정 파일을 읽고 파싱할 때만 발생한다.

use std::path::Path;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Warden 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // Manifest 관련
    // ========================================================================
    #[error("Manifest error: {0}")]
    Manifest(String),

    // ========================================================================
    // 일반
    // ========================================================================
    #[error("Not found: {0}")]
    NotFound(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ========================================================================
    // 기타
    // ========================================================================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// 사용자에게 보여줄 수 있는 에러인지 확인
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::Manifest(_) | Error::NotFound(_) | Error::Config(_)
        )
    }

    /// Manifest 에러 생성 헬퍼 (파일 경로 포함)
    pub fn manifest(path: &Path, message: impl std::fmt::Display) -> Self {
        Error::Manifest(format!("{}: {}", path.display(), message))
    }

    /// 설정 파일 에러 생성 헬퍼 (파일 경로 포함)
    pub fn config(path: &Path, message: impl std::fmt::Display) -> Self {
        Error::Config(format!("{}: {}", path.display(), message))
    }

    /// 파일 없음
    pub fn missing(path: &Path) -> Self {
        Error::NotFound(path.display().to_string())
    }
}

// ============================================================================
// From 구현 (추가 변환)
// ============================================================================

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Internal(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Internal(s.to_string())
    }
}
