//! Access Controller - 명령 실행 게이트
//!
//! | 호출자                  | 결과                                  |
//! |-------------------------|---------------------------------------|
//! | 없음 (콘솔/서버)        | 즉시 실행                             |
//! | 어떤 모듈에도 관리자 아님 | 조용히 거부                          |
//! | 필요 권한 중 하나 보유  | 실행                                  |
//! | 그 외                   | 거부 + 접근 거부 안내                 |

use super::command::{Client, CommandInvocation};
use crate::state::EngineState;
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use warden_foundation::DEFAULT_ACCESS_DENIED_MESSAGE;

/// 호출자에게 메시지를 보내는 출력 채널
pub trait NoticeSink: Send + Sync {
    fn print_chat(&self, client: &Client, message: &str);
    fn print_console(&self, client: &Client, message: &str);
}

/// 로그로만 내보내는 기본 출력
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNoticeSink;

impl NoticeSink for LogNoticeSink {
    fn print_chat(&self, client: &Client, message: &str) {
        info!(target: "warden::chat", "[{}] {}", client, message);
    }

    fn print_console(&self, client: &Client, message: &str) {
        info!(target: "warden::console", "[{}] {}", client, message);
    }
}

/// 게이트 판정
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessDecision {
    /// 콘솔/서버 호출
    Console,
    /// 필요 권한 보유
    Granted,
    /// 관리자 레코드 없음 (조용히 거부)
    NotAdmin,
    /// 관리자지만 권한 없음
    Denied,
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Console | Self::Granted)
    }
}

impl fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Console => "console",
            Self::Granted => "granted",
            Self::NotAdmin => "not-admin",
            Self::Denied => "denied",
        };
        write!(f, "{}", s)
    }
}

/// 공유 엔진 상태를 읽어 명령 실행 여부를 결정한다
#[derive(Clone)]
pub struct AccessController {
    state: Arc<RwLock<EngineState>>,
    notices: Arc<dyn NoticeSink>,
    denied_message: String,

    /// 콘솔 호출을 로그에 남길 때 쓰는 이름
    console_identity: String,
}

impl AccessController {
    pub fn new(state: Arc<RwLock<EngineState>>, notices: Arc<dyn NoticeSink>) -> Self {
        Self {
            state,
            notices,
            denied_message: DEFAULT_ACCESS_DENIED_MESSAGE.to_string(),
            console_identity: "console".to_string(),
        }
    }

    pub fn with_denied_message(mut self, message: impl Into<String>) -> Self {
        self.denied_message = message.into();
        self
    }

    pub fn with_console_identity(mut self, identity: impl Into<String>) -> Self {
        self.console_identity = identity.into();
        self
    }

    pub fn denied_message(&self) -> &str {
        &self.denied_message
    }

    pub fn console_identity(&self) -> &str {
        &self.console_identity
    }

    /// 판정만 수행 (부수효과 없음). 필요 권한은 OR
    pub fn check<S: AsRef<str>>(&self, client: Option<&Client>, required: &[S]) -> AccessDecision {
        let Some(client) = client else {
            return AccessDecision::Console;
        };

        let state = self.state.read();
        match state.get_admin(client.identity()) {
            None => AccessDecision::NotAdmin,
            Some(admin) if admin.has_any_permission(required) => AccessDecision::Granted,
            Some(_) => AccessDecision::Denied,
        }
    }

    /// 판정 후 허용이면 handler 실행, 거부면 안내 전송.
    /// handler는 상태 락을 놓은 뒤 호출된다
    pub fn execute<S, F>(
        &self,
        client: Option<&Client>,
        invocation: &CommandInvocation,
        required: &[S],
        handler: F,
    ) -> AccessDecision
    where
        S: AsRef<str>,
        F: FnOnce(),
    {
        let decision = self.check(client, required);

        match (decision, client) {
            (AccessDecision::Console, _) => {
                debug!("{} ran {}", self.console_identity, invocation.command());
                handler()
            }
            (AccessDecision::Granted, _) => handler(),
            (AccessDecision::Denied, Some(client)) => {
                debug!(
                    "Denied {} for {}: none of {} required permissions",
                    invocation.command(),
                    client,
                    required.len()
                );
                if !invocation.is_chat_trigger() {
                    self.notices.print_console(client, &self.denied_message);
                }
                self.notices.print_chat(client, &self.denied_message);
            }
            _ => {
                debug!("Ignored {} from non-admin caller", invocation.command());
            }
        }

        decision
    }
}
