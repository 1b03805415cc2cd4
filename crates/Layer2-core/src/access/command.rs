//! Command seam - 외부 명령 디스패치 시스템과의 경계
//!
//! 호스트의 명령 시스템은 `CommandManager`/`CommandRegistry` trait으로만
//! 다룬다. `InMemoryCommandManager`는 CLI와 테스트에서 쓰는 기본 구현.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use warden_foundation::{AdminIdentity, CiString};

// ============================================================================
// Invoker / Invocation
// ============================================================================

/// 명령을 호출한 플레이어 (콘솔 호출이면 `None`으로 표현)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    identity: AdminIdentity,
    name: String,
}

impl Client {
    pub fn new(identity: impl Into<AdminIdentity>, name: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            name: name.into(),
        }
    }

    pub fn identity(&self) -> AdminIdentity {
        self.identity
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.identity)
    }
}

/// 명령 호출 정보
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandInvocation {
    command: String,
    args: Vec<String>,

    /// 채팅 트리거(`!cmd`, `/cmd`)로 들어온 호출인지
    chat_trigger: bool,
}

impl CommandInvocation {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    /// 공백 기준 파싱. 첫 토큰이 명령 이름
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let command = tokens.next()?;
        Some(Self {
            command: command.to_string(),
            args: tokens.map(str::to_string).collect(),
            chat_trigger: false,
        })
    }

    /// 채팅 메시지 파싱. `!`/`/` 접두어가 없으면 명령이 아니다
    pub fn from_chat(message: &str) -> Option<Self> {
        let line = message
            .trim_start()
            .strip_prefix('!')
            .or_else(|| message.trim_start().strip_prefix('/'))?;
        Self::parse(line).map(|invocation| invocation.with_chat_trigger(true))
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_chat_trigger(mut self, chat_trigger: bool) -> Self {
        self.chat_trigger = chat_trigger;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    pub fn is_chat_trigger(&self) -> bool {
        self.chat_trigger
    }
}

/// 명령 콜백
pub type CommandCallback = Arc<dyn Fn(Option<&Client>, &CommandInvocation) + Send + Sync>;

// ============================================================================
// Traits
// ============================================================================

/// 모듈 하나의 명령 등록기
pub trait CommandRegistry: Send + Sync {
    /// 소유 모듈
    fn module_id(&self) -> &str;

    /// 명령 등록. 이미 있는 이름이면 false
    fn register_generic_command(&self, name: &str, callback: CommandCallback) -> bool;
}

/// 모듈별 명령 등록기 제공자
pub trait CommandManager: Send + Sync {
    fn get_registry(&self, module_id: &str) -> Arc<dyn CommandRegistry>;

    /// 모듈의 등록기와 그 모듈이 등록한 명령 제거
    fn remove_registry(&self, module_id: &str);
}

// ============================================================================
// In-memory implementation
// ============================================================================

#[derive(Clone)]
struct CommandEntry {
    module: CiString,
    callback: CommandCallback,
}

type CommandTable = Arc<RwLock<HashMap<CiString, CommandEntry>>>;

/// 기본 명령 등록기
pub struct InMemoryCommandRegistry {
    module: CiString,
    commands: CommandTable,
}

impl CommandRegistry for InMemoryCommandRegistry {
    fn module_id(&self) -> &str {
        self.module.as_str()
    }

    fn register_generic_command(&self, name: &str, callback: CommandCallback) -> bool {
        let name = name.trim();
        if name.is_empty() {
            warn!("Module {} tried to register a command without a name", self.module);
            return false;
        }

        let mut commands = self.commands.write();
        let key = CiString::new(name);
        if let Some(existing) = commands.get(&key) {
            warn!(
                "Command {} is already registered by module {}, ignoring registration from {}",
                name, existing.module, self.module
            );
            return false;
        }

        commands.insert(
            key,
            CommandEntry {
                module: self.module.clone(),
                callback,
            },
        );
        debug!("Registered command {} for module {}", name, self.module);
        true
    }
}

/// 기본 명령 관리자. 모든 모듈이 하나의 명령 테이블을 공유한다
#[derive(Default)]
pub struct InMemoryCommandManager {
    commands: CommandTable,
    registries: Mutex<HashMap<CiString, Arc<InMemoryCommandRegistry>>>,
}

impl InMemoryCommandManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 명령 실행. 등록되지 않은 이름이면 false
    pub fn dispatch(&self, client: Option<&Client>, invocation: &CommandInvocation) -> bool {
        // 콜백 실행 중에는 테이블 락을 잡지 않는다
        let callback = self
            .commands
            .read()
            .get(&CiString::new(invocation.command()))
            .map(|entry| Arc::clone(&entry.callback));

        match callback {
            Some(callback) => {
                callback(client, invocation);
                true
            }
            None => {
                debug!("Unknown command: {}", invocation.command());
                false
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.read().contains_key(&CiString::new(name))
    }

    /// 등록된 명령 이름 (정렬)
    pub fn command_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .commands
            .read()
            .keys()
            .map(|name| name.to_string())
            .collect();
        names.sort_by_key(|name| name.to_lowercase());
        names
    }
}

impl CommandManager for InMemoryCommandManager {
    fn get_registry(&self, module_id: &str) -> Arc<dyn CommandRegistry> {
        let mut registries = self.registries.lock();
        let registry = registries
            .entry(CiString::new(module_id))
            .or_insert_with(|| {
                Arc::new(InMemoryCommandRegistry {
                    module: CiString::new(module_id),
                    commands: Arc::clone(&self.commands),
                })
            });
        Arc::clone(registry) as Arc<dyn CommandRegistry>
    }

    fn remove_registry(&self, module_id: &str) {
        let module = CiString::new(module_id);
        self.registries.lock().remove(&module);

        let mut commands = self.commands.write();
        let before = commands.len();
        commands.retain(|_, entry| entry.module != module);
        let removed = before - commands.len();
        if removed > 0 {
            info!("Removed {} commands of module {}", removed, module_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, CommandCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let captured = Arc::clone(&count);
        let callback: CommandCallback = Arc::new(move |_: Option<&Client>, _: &CommandInvocation| {
            captured.fetch_add(1, Ordering::SeqCst);
        });
        (count, callback)
    }

    #[test]
    fn test_parse_invocation() {
        let invocation = CommandInvocation::parse("  kick  u104 spam ").unwrap();
        assert_eq!(invocation.command(), "kick");
        assert_eq!(invocation.args(), ["u104", "spam"]);
        assert!(!invocation.is_chat_trigger());
        assert!(CommandInvocation::parse("   ").is_none());
    }

    #[test]
    fn test_chat_trigger() {
        let invocation = CommandInvocation::from_chat("!slay u105").unwrap();
        assert_eq!(invocation.command(), "slay");
        assert_eq!(invocation.arg(0), Some("u105"));
        assert!(invocation.is_chat_trigger());

        assert!(CommandInvocation::from_chat("/kick").unwrap().is_chat_trigger());
        assert!(CommandInvocation::from_chat("hello there").is_none());
    }

    #[test]
    fn test_dispatch_is_case_insensitive() {
        let manager = InMemoryCommandManager::new();
        let (count, callback) = counter();

        assert!(manager
            .get_registry("pluginB")
            .register_generic_command("Kick", callback));
        assert!(manager.dispatch(None, &CommandInvocation::new("KICK")));
        assert!(!manager.dispatch(None, &CommandInvocation::new("slay")));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_duplicate_rejected_across_modules() {
        let manager = InMemoryCommandManager::new();
        let (_, first) = counter();
        let (_, second) = counter();

        assert!(manager.get_registry("a").register_generic_command("kick", first));
        assert!(!manager.get_registry("b").register_generic_command("kick", second));
        assert_eq!(manager.command_names(), vec!["kick"]);
    }

    #[test]
    fn test_remove_registry_drops_commands() {
        let manager = InMemoryCommandManager::new();
        let (_, a) = counter();
        let (_, b) = counter();

        manager.get_registry("a").register_generic_command("kick", a);
        manager.get_registry("b").register_generic_command("slay", b);
        manager.remove_registry("A");

        assert!(!manager.contains("kick"));
        assert!(manager.contains("slay"));
    }

    #[test]
    fn test_registry_is_shared_per_module() {
        let manager = InMemoryCommandManager::new();
        let first = manager.get_registry("pluginA");
        let second = manager.get_registry("PLUGINA");
        assert_eq!(first.module_id(), "pluginA");
        assert_eq!(second.module_id(), "pluginA");
    }
}
