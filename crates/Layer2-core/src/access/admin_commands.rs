//! Admin command registry - 권한 게이트가 붙은 명령 등록

use super::command::{Client, CommandCallback, CommandInvocation, CommandRegistry};
use super::controller::AccessController;
use std::sync::Arc;
use tracing::debug;

/// 모듈 하나의 관리자 명령 등록기
#[derive(Clone)]
pub struct AdminCommandRegistry {
    inner: Arc<dyn CommandRegistry>,
    controller: AccessController,
}

impl AdminCommandRegistry {
    pub fn new(inner: Arc<dyn CommandRegistry>, controller: AccessController) -> Self {
        Self { inner, controller }
    }

    pub fn module_id(&self) -> &str {
        self.inner.module_id()
    }

    /// `permissions` 중 하나라도 가진 관리자(또는 콘솔)만 실행할 수 있는 명령 등록
    pub fn register_admin_command<F>(&self, command: &str, handler: F, permissions: Vec<String>) -> bool
    where
        F: Fn(Option<&Client>, &CommandInvocation) + Send + Sync + 'static,
    {
        let controller = self.controller.clone();
        let callback: CommandCallback =
            Arc::new(move |client: Option<&Client>, invocation: &CommandInvocation| {
                controller.execute(client, invocation, permissions.as_slice(), || {
                    handler(client, invocation)
                });
            });

        let registered = self.inner.register_generic_command(command, callback);
        if registered {
            debug!(
                "Registered admin command {} for module {}",
                command,
                self.inner.module_id()
            );
        }
        registered
    }
}
