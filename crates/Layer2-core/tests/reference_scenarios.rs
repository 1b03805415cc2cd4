//! 기준 시나리오 통합 테스트
//!
//! `AdminManager`를 통해 manifest 마운트부터 명령 게이트까지 검증

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use warden_core::{
    AccessDecision, AdminManager, Client, CommandInvocation, InMemoryCommandManager, NoticeSink,
};
use warden_foundation::{parse_manifest, PermissionSet, WardenConfig};

const CORE_MANIFEST: &str = r#"{
    "permissionCollections": {
        "system": ["system:role:create", "system:role:delete"],
        "pluginA": ["pluginA:getWeapon", "pluginA:fetchItems"],
        "pluginB": ["pluginB:kick", "pluginB:slay"],
    },
    "roles": [
        { "name": "global_root", "permissions": ["*"] },
        { "name": "pluginA_admin", "permissions": ["pluginA:*"] },
        { "name": "loopA", "permissions": ["@loopB"] },
        { "name": "loopB", "permissions": ["@loopA"] },
    ],
    "admins": [
        // everything except slay
        { "name": "u100", "identity": 100, "immunity": 100,
          "permissions": ["@global_root", "!pluginB:slay"] },
        { "name": "u104", "identity": 104, "immunity": 10,
          "permissions": ["@pluginA_admin", "pluginB:kick"] },
        { "name": "u105", "identity": 105,
          "permissions": ["pluginA:getWeapon", "!pluginA:fetchItems"] },
        { "name": "u106", "identity": 106, "permissions": ["@loopA"] },
    ],
}"#;

#[derive(Default)]
struct Notices {
    chat: Mutex<Vec<String>>,
    console: Mutex<Vec<String>>,
}

impl NoticeSink for Notices {
    fn print_chat(&self, client: &Client, message: &str) {
        self.chat.lock().push(format!("{} <- {}", client.name(), message));
    }

    fn print_console(&self, client: &Client, message: &str) {
        self.console.lock().push(format!("{} <- {}", client.name(), message));
    }
}

fn manager() -> AdminManager {
    let manager = AdminManager::default();
    manager.mount_manifest("core", &parse_manifest(CORE_MANIFEST).unwrap());
    manager
}

fn names(set: &PermissionSet) -> Vec<String> {
    set.iter().map(|p| p.to_string()).collect()
}

// ============================================================================
// Pattern matching
// ============================================================================

#[test]
fn star_matches_whole_universe() {
    let manager = manager();
    let snapshot = manager.snapshot();
    assert_eq!(manager.resolve("core", &["*"]).len(), snapshot.universe.len());
    assert_eq!(snapshot.universe.len(), 6);
}

#[test]
fn inner_wildcard_matches_one_segment() {
    let manager = manager();
    assert_eq!(
        names(&manager.resolve("core", &["SYSTEM:*:create"])),
        vec!["system:role:create"]
    );
    assert!(manager.resolve("core", &["system:*"]).is_empty());
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn deny_takes_precedence() {
    let manager = manager();
    assert_eq!(
        names(&manager.resolve("core", &["pluginA:*", "!pluginA:fetchItems"])),
        vec!["pluginA:getWeapon"]
    );
}

#[test]
fn role_reference_equals_inline_rules() {
    let manager = manager();
    assert_eq!(
        manager.resolve("core", &["@pluginA_admin"]),
        manager.resolve("core", &["pluginA:*"])
    );
}

#[test]
fn scenario_u100_root_without_slay() {
    let manager = manager();
    let admin = manager.get_admin(100).unwrap();

    assert_eq!(admin.permissions().len(), 5);
    assert!(admin.has_permission("pluginB:kick"));
    assert!(admin.has_permission("pluginA:getWeapon"));
    assert!(!admin.has_permission("pluginB:slay"));
}

#[test]
fn scenario_u104_role_plus_grant() {
    let manager = manager();
    let admin = manager.get_admin(104).unwrap();

    assert_eq!(
        names(admin.permissions()),
        vec!["pluginA:fetchItems", "pluginA:getWeapon", "pluginB:kick"]
    );
}

#[test]
fn scenario_u105_deny_of_ungranted_is_harmless() {
    let manager = manager();
    let admin = manager.get_admin(105).unwrap();
    assert_eq!(names(admin.permissions()), vec!["pluginA:getWeapon"]);
}

#[test]
fn scenario_u106_cycle_resolves_empty() {
    let manager = manager();
    let admin = manager.get_admin(106).unwrap();
    assert!(admin.permissions().is_empty());
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn unmount_isolates_module() {
    let manager = manager();
    manager.mount_manifest(
        "pluginC",
        &parse_manifest(
            r#"{
                "permissionCollections": { "pluginC": ["pluginC:spawn"] },
                "admins": [ { "name": "c", "identity": 300, "permissions": ["pluginC:*"] } ]
            }"#,
        )
        .unwrap(),
    );
    assert!(manager.get_admin(300).unwrap().has_permission("pluginC:spawn"));

    assert!(manager.unmount_module("pluginC"));
    assert!(manager.get_admin(300).is_none());
    assert!(!manager.snapshot().universe.contains(&"pluginC:spawn".to_string()));
    assert!(manager.get_admin(100).is_some());
}

#[test]
fn unmount_removes_shared_spelling_from_other_modules() {
    let manager = AdminManager::default();
    manager.mount_manifest(
        "a",
        &parse_manifest(r#"{ "permissionCollections": { "a": ["shared:perm"] } }"#).unwrap(),
    );
    manager.mount_manifest(
        "b",
        &parse_manifest(r#"{ "permissionCollections": { "b": ["SHARED:perm"] } }"#).unwrap(),
    );
    assert_eq!(manager.resolve("b", &["shared:*"]).len(), 1);

    // universe는 모듈별 참조 카운트가 없다
    assert!(manager.unmount_module("a"));
    assert!(manager.snapshot().universe.is_empty());
    assert!(manager.resolve("b", &["shared:*"]).is_empty());
    assert!(manager.is_mounted("b"));
}

#[test]
fn add_permission_is_idempotent() {
    let manager = manager();
    let before = manager.get_admin(105).unwrap().permissions().len();

    assert!(manager.add_permission(105, "pluginB:kick"));
    assert!(!manager.add_permission(105, "pluginB:kick"));
    assert_eq!(manager.get_admin(105).unwrap().permissions().len(), before + 1);
}

#[test]
fn immunity_targets() {
    let manager = manager();
    let root = manager.get_admin(100).unwrap();
    let moderator = manager.get_admin(104).unwrap();

    assert!(root.can_target(&moderator));
    assert!(!moderator.can_target(&root));
}

// ============================================================================
// Gating
// ============================================================================

#[test]
fn gated_command_end_to_end() {
    let commands = Arc::new(InMemoryCommandManager::new());
    let notices = Arc::new(Notices::default());
    let manager = AdminManager::new(WardenConfig::default())
        .with_command_manager(commands.clone())
        .with_notice_sink(notices.clone());
    manager.mount_manifest("core", &parse_manifest(CORE_MANIFEST).unwrap());

    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    manager.get_command_registry("pluginB").register_admin_command(
        "slay",
        move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        },
        vec!["pluginB:slay".to_string(), "system:role:delete".to_string()],
    );

    let u100 = Client::new(100, "u100");
    let stranger = Client::new(999, "stranger");

    // u100: system:role:delete 보유 (OR)
    commands.dispatch(Some(&u100), &CommandInvocation::new("slay"));
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    // 비관리자: 조용히 무시
    commands.dispatch(Some(&stranger), &CommandInvocation::new("slay"));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(notices.chat.lock().is_empty());

    // u105: 관리자지만 권한 없음, 채팅 트리거
    let u105 = Client::new(105, "u105");
    commands.dispatch(Some(&u105), &CommandInvocation::from_chat("!slay u104").unwrap());
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(
        *notices.chat.lock(),
        vec!["u105 <- [MS] You do not have access to do this command."]
    );
    assert!(notices.console.lock().is_empty());

    // 콘솔
    commands.dispatch(None, &CommandInvocation::new("SLAY"));
    assert_eq!(runs.load(Ordering::SeqCst), 2);

    assert_eq!(
        manager.check_access(Some(&u105), &["pluginA:getWeapon"]),
        AccessDecision::Granted
    );

    // 언마운트하면 모듈 명령도 사라진다
    manager.unmount_module("pluginB");
    assert!(!commands.dispatch(None, &CommandInvocation::new("slay")));
}
