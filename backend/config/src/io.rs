//! Config file read/write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::fs;
use tracing::{debug, info};

use crate::schema::GuardConfig;

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve the config directory.
/// Priority: `LDGUARD_CONFIG_DIR` env > `~/.ldguard/` > `./.ldguard`.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LDGUARD_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".ldguard"),
        None => PathBuf::from(".ldguard"),
    }
}

/// Resolve the full path to the config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Read the config file as an untyped value tree.
///
/// Returns `Ok(None)` if the file doesn't exist (first run).
pub async fn load_raw(path: &Path) -> Result<Option<Value>> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let value: Value = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config TOML at: {}", path.display()))?;

    Ok(Some(value))
}

/// Load and parse the config from disk without env substitution.
///
/// Returns `Ok(Default::default())` if the file doesn't exist.
pub async fn load_config(path: &Path) -> Result<GuardConfig> {
    let Some(value) = load_raw(path).await? else {
        return Ok(GuardConfig::default());
    };
    let config: GuardConfig = serde_json::from_value(value)
        .with_context(|| format!("Invalid config at: {}", path.display()))?;
    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Write config to disk atomically (write to temp file, rename).
pub async fn write_config(config: &GuardConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    let text = toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, text.as_bytes())
        .await
        .with_context(|| format!("Failed to write temp config: {}", tmp_path.display()))?;

    fs::rename(&tmp_path, path).await.with_context(|| {
        format!("Failed to rename temp config to: {}", path.display())
    })?;

    info!(path = %path.display(), "Wrote config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("ldguard-config-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn missing_file_gives_defaults() {
        let path = config_file_path(&scratch_dir());
        let cfg = load_config(&path).await.unwrap();
        assert_eq!(cfg, GuardConfig::default());
    }

    #[tokio::test]
    async fn write_then_load_preserves_values() {
        let dir = scratch_dir();
        let path = config_file_path(&dir);

        let mut cfg = GuardConfig::default();
        cfg.security.mode = "normal".to_string();
        cfg.security.developer_whitelist = vec!["42".to_string()];
        cfg.execution.napcat_port = 3100;
        write_config(&cfg, &path).await.unwrap();

        assert!(!path.with_extension("toml.tmp").exists());
        let loaded = load_config(&path).await.unwrap();
        assert_eq!(loaded, cfg);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn malformed_toml_is_an_error() {
        let dir = scratch_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = config_file_path(&dir);
        std::fs::write(&path, "[security\nmode = ").unwrap();

        let err = load_config(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config TOML"));

        let _ = std::fs::remove_dir_all(dir);
    }
}
