//! Admin Manager - 권한 엔진 전체의 진입점
//!
//! 호스트가 모듈을 로드/언로드할 때 manifest를 마운트/언마운트하고,
//! 명령 등록기와 접근 게이트를 모듈별로 나눠준다.
//!
//! ```ignore
//! let manager = AdminManager::new(WardenConfig::load()?);
//! manager.load_manifest_file("core", &manager.config().manifest_path(root));
//!
//! let registry = manager.get_command_registry("pluginB");
//! registry.register_admin_command("slay", handler, vec!["pluginB:slay".into()]);
//! ```

use crate::access::{
    AccessController, AccessDecision, AdminCommandRegistry, Client, CommandManager,
    InMemoryCommandManager, LogNoticeSink, NoticeSink,
};
use crate::admin::Admin;
use crate::state::{EngineSnapshot, EngineState, MountSummary};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use warden_foundation::{
    load_manifest_optional, AdminIdentity, AdminTableManifest, CiString, PermissionSet,
    WardenConfig,
};

/// 권한 엔진 매니저
pub struct AdminManager {
    /// Universe + Catalog + Admin Registry (하나의 락)
    state: Arc<RwLock<EngineState>>,

    /// 설정
    config: WardenConfig,

    /// 외부 명령 시스템
    commands: Arc<dyn CommandManager>,

    /// 거부 안내 출력
    notices: Arc<dyn NoticeSink>,

    /// 모듈별 관리자 명령 등록기 캐시
    registries: Mutex<HashMap<CiString, AdminCommandRegistry>>,
}

impl AdminManager {
    /// 기본 명령 관리자(in-memory) + 로그 출력으로 생성
    pub fn new(config: WardenConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(EngineState::new())),
            config,
            commands: Arc::new(InMemoryCommandManager::new()),
            notices: Arc::new(LogNoticeSink),
            registries: Mutex::new(HashMap::new()),
        }
    }

    /// 호스트 명령 시스템 연결
    pub fn with_command_manager(mut self, commands: Arc<dyn CommandManager>) -> Self {
        self.commands = commands;
        self.registries.get_mut().clear();
        self
    }

    pub fn with_notice_sink(mut self, notices: Arc<dyn NoticeSink>) -> Self {
        self.notices = notices;
        self.registries.get_mut().clear();
        self
    }

    pub fn config(&self) -> &WardenConfig {
        &self.config
    }

    /// 공유 상태 핸들
    pub fn state(&self) -> Arc<RwLock<EngineState>> {
        Arc::clone(&self.state)
    }

    // ========================================================================
    // Mount / Unmount
    // ========================================================================

    /// manifest 마운트 (같은 모듈에 여러 번 가능, 이름 단위 병합)
    pub fn mount_manifest(&self, module_id: &str, manifest: &AdminTableManifest) -> MountSummary {
        let mut state = self.state.write();
        let summary = state.mount(module_id, manifest);

        info!(
            "Mounted manifest for {}: {} collections, {} roles, {} new admins",
            module_id, summary.collections, summary.roles, summary.admins_created
        );

        if tracing::enabled!(tracing::Level::DEBUG) {
            match serde_json::to_string_pretty(&state.snapshot()) {
                Ok(json) => debug!("Permission state after mounting {}:\n{}", module_id, json),
                Err(e) => warn!("Failed to serialize permission state: {}", e),
            }
        }

        summary
    }

    /// 파일에서 manifest 로드 후 마운트.
    /// 파일이 없거나 잘못되면 경고만 남기고 false
    pub fn load_manifest_file(&self, module_id: &str, path: &Path) -> bool {
        match load_manifest_optional(path) {
            Ok(Some(manifest)) => {
                self.mount_manifest(module_id, &manifest);
                true
            }
            Ok(None) => {
                warn!(
                    "Manifest {} not found, {} starts with no admin data",
                    path.display(),
                    module_id
                );
                false
            }
            Err(e) => {
                warn!("Failed to load manifest for {}: {}", module_id, e);
                false
            }
        }
    }

    /// 설정의 기본 manifest 경로(`<root>/configs/admin.jsonc`)에서 로드
    pub fn load_default_manifest(&self, module_id: &str, root: &Path) -> bool {
        let path = self.config.manifest_path(root);
        self.load_manifest_file(module_id, &path)
    }

    /// 모듈 언마운트. 카탈로그, universe 기여분, 관리자 목록을 한 번에 제거하고
    /// 모듈의 명령도 정리한다
    pub fn unmount_module(&self, module_id: &str) -> bool {
        let removed = self.state.write().unmount(module_id);

        self.registries.lock().remove(&CiString::new(module_id));
        self.commands.remove_registry(module_id);

        if removed {
            info!("Unmounted module {}", module_id);
        } else {
            debug!("Unmount of unknown module {} ignored", module_id);
        }
        removed
    }

    pub fn is_mounted(&self, module_id: &str) -> bool {
        self.state.read().is_mounted(module_id)
    }

    // ========================================================================
    // Admin
    // ========================================================================

    /// 마운트 순서상 첫 모듈의 관리자 레코드 (복사본)
    pub fn get_admin(&self, identity: impl Into<AdminIdentity>) -> Option<Admin> {
        self.state.read().get_admin(identity.into()).cloned()
    }

    /// 복사 없이 레코드 조회
    pub fn with_admin<R>(
        &self,
        identity: impl Into<AdminIdentity>,
        f: impl FnOnce(&Admin) -> R,
    ) -> Option<R> {
        self.state.read().get_admin(identity.into()).map(f)
    }

    /// `get_admin`이 돌려주는 레코드에 권한 추가. 변경 여부 반환
    pub fn add_permission(&self, identity: impl Into<AdminIdentity>, permission: &str) -> bool {
        self.state
            .write()
            .admins_mut()
            .get_admin_mut(identity.into())
            .is_some_and(|admin| admin.add_permission(permission))
    }

    pub fn remove_permission(&self, identity: impl Into<AdminIdentity>, permission: &str) -> bool {
        self.state
            .write()
            .admins_mut()
            .get_admin_mut(identity.into())
            .is_some_and(|admin| admin.remove_permission(permission))
    }

    /// 임의 규칙 해석 (모듈 범위)
    pub fn resolve<S: AsRef<str>>(&self, module_id: &str, rules: &[S]) -> PermissionSet {
        self.state.read().resolve(module_id, rules)
    }

    // ========================================================================
    // Access
    // ========================================================================

    pub fn access_controller(&self) -> AccessController {
        AccessController::new(Arc::clone(&self.state), Arc::clone(&self.notices))
            .with_denied_message(self.config.access_denied_message.as_str())
            .with_console_identity(self.config.console_identity.as_str())
    }

    pub fn check_access<S: AsRef<str>>(
        &self,
        client: Option<&Client>,
        required: &[S],
    ) -> AccessDecision {
        self.access_controller().check(client, required)
    }

    /// 모듈의 관리자 명령 등록기 (모듈당 하나)
    pub fn get_command_registry(&self, module_id: &str) -> AdminCommandRegistry {
        let mut registries = self.registries.lock();
        registries
            .entry(CiString::new(module_id))
            .or_insert_with(|| {
                AdminCommandRegistry::new(
                    self.commands.get_registry(module_id),
                    self.access_controller(),
                )
            })
            .clone()
    }

    /// 상태 스냅샷
    pub fn snapshot(&self) -> EngineSnapshot {
        self.state.read().snapshot()
    }
}

impl Default for AdminManager {
    fn default() -> Self {
        Self::new(WardenConfig::default())
    }
}
