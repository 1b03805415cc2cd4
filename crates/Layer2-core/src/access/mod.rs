//! Access - 명령 게이트와 명령 시스템 경계
//!
//! - `command`: `CommandRegistry`/`CommandManager` trait + in-memory 구현
//! - `controller`: 콘솔 우회, 비관리자 무시, OR 권한 검사, 거부 안내
//! - `admin_commands`: 게이트를 씌운 명령 등록

mod admin_commands;
mod command;
mod controller;

pub use admin_commands::AdminCommandRegistry;
pub use command::{
    Client, CommandCallback, CommandInvocation, CommandManager, CommandRegistry,
    InMemoryCommandManager, InMemoryCommandRegistry,
};
pub use controller::{AccessController, AccessDecision, LogNoticeSink, NoticeSink};
