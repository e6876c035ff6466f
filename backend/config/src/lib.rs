//! `ldguard-config`: configuration for the leave/delete guard plugin.
//!
//! Provides:
//! - Typed config schema with per-key defaults
//! - Lenient scalar parsing for host-generated files
//! - TOML read/write with atomic replace
//! - `${ENV_VAR}` substitution
//! - Validation and redaction for safe logging/display

pub mod defaults;
pub mod env;
pub mod io;
pub mod lenient;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::COMMAND_PREFIX;
pub use env::{resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, load_raw, write_config};
pub use lenient::parse_bool_like;
pub use redact::{redact, redacted_snapshot};
pub use schema::{CommandSection, ExecutionSection, GuardConfig, PluginSection, SecuritySection};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use std::path::Path;

/// Load a config file and apply `${VAR}` substitution, without validating.
///
/// A missing file yields the defaults.
pub async fn load_resolved(path: &Path) -> Result<GuardConfig> {
    let Some(value) = load_raw(path).await? else {
        return Ok(GuardConfig::default());
    };
    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;
    serde_json::from_value(value).with_context(|| format!("Invalid config at: {}", path.display()))
}

/// Load, apply env substitution, and validate a config file.
///
/// This is the main entry point for loading a config at runtime. Warnings are
/// logged; validation errors fail the load.
pub async fn load_and_prepare(path: &Path) -> Result<GuardConfig> {
    let config = load_resolved(path).await?;

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        bail!("{} config error(s) in {}", report.errors.len(), path.display());
    }

    tracing::debug!(config = %redacted_snapshot(&config), "Config ready");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("ldguard-load-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = config_file_path(&dir);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let dir = std::env::temp_dir().join(format!("ldguard-none-{}", uuid::Uuid::new_v4()));
        let config = load_and_prepare(&config_file_path(&dir)).await.unwrap();
        assert_eq!(config, GuardConfig::default());
    }

    #[tokio::test]
    async fn lenient_file_loads() {
        let path = temp_config(
            r#"
[security]
mode = "NORMAL"
developer_whitelist = [12345, " 678 ", ""]
allow_force = "off"

[execution]
napcat_port = "3001"
default_dry_run = "yes"
"#,
        );
        let config = load_and_prepare(&path).await.unwrap();
        assert_eq!(config.security.developer_whitelist, vec!["12345", "678"]);
        assert!(!config.security.allow_force);
        assert_eq!(config.execution.napcat_port, 3001);
        assert!(config.execution.default_dry_run);
    }

    #[tokio::test]
    async fn non_string_scalars_are_coerced() {
        let path = temp_config(
            r#"
[plugin]
config_version = 2

[security]
mode = 1
min_reason_length = "10"

[execution]
napcat_token = 123456
timeout_secs = "15"

[command]
prefix = 7
"#,
        );
        let config = load_and_prepare(&path).await.unwrap();
        assert_eq!(config.plugin.config_version, "2");
        assert_eq!(config.security.mode, "1");
        assert_eq!(config.security_mode(), ldguard_core::SecurityMode::Cautious);
        assert_eq!(config.security.min_reason_length, 10);
        assert_eq!(config.execution.napcat_token, "123456");
        assert_eq!(config.execution.timeout_secs, 15);
        assert_eq!(config.command.prefix, "7");

        let report = validate(&config);
        assert!(report.warnings.iter().any(|w| w.path == "security.mode"));
        assert!(report.warnings.iter().any(|w| w.path == "command.prefix"));
    }

    #[tokio::test]
    async fn validation_errors_fail_the_load() {
        let path = temp_config("[execution]\nnapcat_port = 0\n");
        let err = load_and_prepare(&path).await.unwrap_err();
        assert!(err.to_string().contains("1 config error(s)"));
    }

    #[tokio::test]
    async fn unresolved_env_var_is_an_error() {
        let path = temp_config(
            "[execution]\nnapcat_token = \"${LDGUARD_TEST_SURELY_UNSET_VAR}\"\n",
        );
        assert!(load_resolved(&path).await.is_err());
    }
}
