//! warden-core: Core Runtime for Warden
//!
//! Layer2 - 권한 엔진 구현 레이어
//!
//! # 주요 모듈
//!
//! - `catalog`: 모듈별 permission collection / role 저장소
//! - `resolver`: 규칙(grant, `!deny`, `@role`) → concrete 권한 집합
//! - `admin`: 관리자 레코드와 모듈별 Admin Registry
//! - `state`: Universe + Catalog + Registry 묶음 (mount/unmount 단위)
//! - `access`: 명령 게이트, 명령 시스템 경계 trait
//! - `manager`: `AdminManager` 파사드
//!
//! # 사용 예시
//!
//! ```ignore
//! use warden_core::{AdminManager, Client};
//! use warden_foundation::WardenConfig;
//!
//! let manager = AdminManager::new(WardenConfig::load()?);
//! manager.load_manifest_file("core", Path::new("configs/admin.jsonc"));
//!
//! // 관리자 조회
//! if let Some(admin) = manager.get_admin(76561198000000100) {
//!     println!("{} has {} permissions", admin.name(), admin.permissions().len());
//! }
//!
//! // 게이트가 붙은 명령
//! manager
//!     .get_command_registry("pluginB")
//!     .register_admin_command("slay", |client, invocation| { /* ... */ }, vec!["pluginB:slay".into()]);
//! ```

pub mod access;
pub mod admin;
pub mod catalog;
pub mod manager;
pub mod resolver;
pub mod state;

/// crate 버전
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-exports: Catalog / Resolver
pub use catalog::{ModuleCatalog, ModuleEntry, Role};
pub use resolver::PermissionResolver;

// Re-exports: Admin
pub use admin::{Admin, AdminRegistry, ModuleAdmins};

// Re-exports: State
pub use state::{EngineSnapshot, EngineState, ModuleSnapshot, MountSummary};

// Re-exports: Access
pub use access::{
    AccessController, AccessDecision, AdminCommandRegistry, Client, CommandCallback,
    CommandInvocation, CommandManager, CommandRegistry, InMemoryCommandManager,
    InMemoryCommandRegistry, LogNoticeSink, NoticeSink,
};

// Re-exports: Manager
pub use manager::AdminManager;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
