//! Warden CLI - Main entry point

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use warden_foundation::WardenConfig;

/// Warden - multi-tenant permission resolution for server modules
#[derive(Parser, Debug)]
#[command(name = "warden")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Config file (default: global + project warden.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve an ad-hoc rule list against a manifest
    Resolve {
        /// Manifest file (admin.jsonc)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Module identity to mount the manifest under
        #[arg(long, default_value = "core")]
        module: String,

        /// Rules, e.g. "pluginA:*" "!pluginA:fetchItems" "@global_root"
        #[arg(required = true, allow_hyphen_values = true)]
        rules: Vec<String>,
    },
    /// List admin records
    Admins {
        /// Manifest file (admin.jsonc)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Module identity to mount the manifest under
        #[arg(long, default_value = "core")]
        module: String,

        /// Print the full state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the access decision for an identity
    Check {
        /// Manifest file (admin.jsonc)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Module identity to mount the manifest under
        #[arg(long, default_value = "core")]
        module: String,

        /// Admin identity (64-bit account id)
        #[arg(long)]
        identity: u64,

        /// Required permissions (any one suffices)
        #[arg(required = true)]
        permissions: Vec<String>,
    },
}

/// `RUST_LOG`가 없을 때의 기본 로그 레벨
fn log_level(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = log_level(args.debug);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Load configuration
    let config = match &args.config {
        Some(path) => WardenConfig::load_from(path)?,
        None => WardenConfig::load().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {}", e);
            WardenConfig::default()
        }),
    };

    match args.command {
        Command::Resolve {
            manifest,
            module,
            rules,
        } => cli::run_resolve(config, &manifest, &module, &rules),
        Command::Admins {
            manifest,
            module,
            json,
        } => cli::run_admins(config, &manifest, &module, json),
        Command::Check {
            manifest,
            module,
            identity,
            permissions,
        } => cli::run_check(config, &manifest, &module, identity, &permissions),
    }
}
