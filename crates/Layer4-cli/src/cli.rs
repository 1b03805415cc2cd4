//! Non-interactive commands

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;
use warden_core::{AccessDecision, Admin, AdminManager, Client};
use warden_foundation::{load_manifest, WardenConfig};

/// manifest를 읽어 모듈로 마운트한 매니저
fn mounted(config: WardenConfig, manifest: &Path, module: &str) -> Result<AdminManager> {
    let table = load_manifest(manifest)
        .with_context(|| format!("Failed to load manifest {}", manifest.display()))?;

    let manager = AdminManager::new(config);
    let summary = manager.mount_manifest(module, &table);
    debug!("Mounted {:?}", summary);
    Ok(manager)
}

/// `warden resolve`
pub fn run_resolve(
    config: WardenConfig,
    manifest: &Path,
    module: &str,
    rules: &[String],
) -> Result<()> {
    let manager = mounted(config, manifest, module)?;

    for permission in manager.resolve(module, rules) {
        println!("{}", permission);
    }
    Ok(())
}

/// `warden admins`
pub fn run_admins(config: WardenConfig, manifest: &Path, module: &str, json: bool) -> Result<()> {
    let manager = mounted(config, manifest, module)?;
    let snapshot = manager.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    for module in &snapshot.modules {
        println!("[{}]", module.module);
        if module.admins.is_empty() {
            println!("  (no admins)");
        }
        for admin in &module.admins {
            println!("{}", format_admin(admin));
        }
    }
    Ok(())
}

/// `warden check`
pub fn run_check(
    config: WardenConfig,
    manifest: &Path,
    module: &str,
    identity: u64,
    permissions: &[String],
) -> Result<()> {
    let manager = mounted(config, manifest, module)?;
    let client = Client::new(identity, identity.to_string());

    let decision = manager.check_access(Some(&client), permissions);
    println!("{}", decision);

    if decision == AccessDecision::Denied {
        println!("{}", manager.config().access_denied_message);
    }
    Ok(())
}

fn format_admin(admin: &Admin) -> String {
    let permissions: Vec<String> = admin.permissions().iter().map(|p| p.to_string()).collect();
    format!(
        "  {} ({}) immunity={}: {}",
        admin.name(),
        admin.identity(),
        admin.immunity(),
        if permissions.is_empty() {
            "-".to_string()
        } else {
            permissions.join(", ")
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use warden_foundation::{AdminIdentity, CiString};

    #[test]
    fn test_format_admin() {
        let admin = Admin::new(
            "u105",
            AdminIdentity(105),
            0,
            [CiString::new("pluginA:getWeapon")].into_iter().collect(),
        );
        assert_eq!(
            format_admin(&admin),
            "  u105 (105) immunity=0: pluginA:getWeapon"
        );
    }

    #[test]
    fn test_mounted_requires_manifest() {
        let dir = tempdir().unwrap();
        assert!(mounted(WardenConfig::default(), &dir.path().join("nope.jsonc"), "core").is_err());

        let path = dir.path().join("admin.jsonc");
        fs::write(&path, r#"{ "permissionCollections": { "a": ["a:b"] } }"#).unwrap();
        let manager = mounted(WardenConfig::default(), &path, "core").unwrap();
        assert_eq!(manager.resolve("core", &["a:*"]).len(), 1);
    }
}
