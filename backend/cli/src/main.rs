mod config;
mod config_cmd;
mod console;
mod terminal_output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use ldguard_config::{config_dir, config_file_path, load_and_prepare};
use ldguard_plugin::LeaveDeleteGuardPlugin;

use config::CliSettings;
use console::{ConsoleHost, ConsoleIdentity};

#[derive(Parser)]
#[command(name = "ldguard")]
#[command(about = "Leave/delete guard: config tooling and a local console host")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config.toml
    InitConfig {
        /// Config file path (default: $LDGUARD_CONFIG_DIR/config.toml or ~/.ldguard/config.toml)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Load and validate the config, then print it with secrets masked
    CheckConfig {
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Read chat lines from stdin and feed them to the plugin
    Console {
        /// Sender user id
        #[arg(long)]
        user: String,
        /// Group id; omit for a private chat with --user
        #[arg(long)]
        group: Option<String>,
        #[arg(long)]
        path: Option<PathBuf>,
        /// Force dry-run regardless of config
        #[arg(long)]
        dry_run: bool,
    },
}

fn resolve_path(path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(|| config_file_path(&config_dir()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = CliSettings::from_env();
    ldguard_logging::init_logger(settings.log_dir.as_deref(), &settings.log_level);

    let cli = Cli::parse();

    match cli.command {
        Commands::InitConfig { path, force } => {
            config_cmd::init(&resolve_path(path), force).await?;
        }
        Commands::CheckConfig { path } => {
            config_cmd::check(&resolve_path(path)).await?;
        }
        Commands::Console { user, group, path, dry_run } => {
            let path = resolve_path(path);
            let mut config = load_and_prepare(&path).await?;
            if dry_run {
                config.execution.default_dry_run = true;
            }
            info!(path = %path.display(), user = %user, group = ?group, "Starting console");

            let host = Arc::new(ConsoleHost::stdout());
            let plugin = LeaveDeleteGuardPlugin::from_config(config, host)?;
            let identity = ConsoleIdentity { user_id: user, group_id: group };
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let handled = console::run(&plugin, &identity, stdin).await?;
            info!(handled, "Console closed");
        }
    }

    Ok(())
}
