//! Plugin configuration schema.
//!
//! One TOML table per section, every key optional. Unknown keys are ignored so
//! host-added metadata does not break loading.

use ldguard_core::SecurityMode;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::lenient;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuardConfig {
    #[serde(default)]
    pub plugin: PluginSection,

    #[serde(default)]
    pub security: SecuritySection,

    #[serde(default)]
    pub execution: ExecutionSection,

    #[serde(default)]
    pub command: CommandSection,
}

impl GuardConfig {
    /// Configured security mode; anything unrecognized is treated as cautious.
    pub fn security_mode(&self) -> SecurityMode {
        SecurityMode::parse(&self.security.mode).unwrap_or(SecurityMode::Cautious)
    }

    /// Base URL of the NapCat HTTP endpoint, without a trailing slash.
    pub fn napcat_base_url(&self) -> String {
        format!(
            "http://{}:{}",
            self.execution.napcat_host.trim(),
            self.execution.napcat_port
        )
    }
}

// ---------------------------------------------------------------------------
// [plugin]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSection {
    #[serde(default = "defaults::enabled", deserialize_with = "lenient::bool_default_true")]
    pub enabled: bool,

    #[serde(default = "defaults::config_version", deserialize_with = "lenient::string_like")]
    pub config_version: String,
}

impl Default for PluginSection {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
            config_version: defaults::config_version(),
        }
    }
}

// ---------------------------------------------------------------------------
// [security]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecuritySection {
    /// `cautious` or `normal`.
    #[serde(default = "defaults::mode", deserialize_with = "lenient::string_like")]
    pub mode: String,

    /// User ids allowed to use `force` and, by default, the `/ldg` commands.
    #[serde(default, deserialize_with = "lenient::id_list")]
    pub developer_whitelist: Vec<String>,

    #[serde(default = "defaults::allow_force", deserialize_with = "lenient::bool_default_true")]
    pub allow_force: bool,

    #[serde(default = "defaults::min_reason_length", deserialize_with = "lenient::usize_like")]
    pub min_reason_length: usize,
}

impl Default for SecuritySection {
    fn default() -> Self {
        Self {
            mode: defaults::mode(),
            developer_whitelist: Vec::new(),
            allow_force: defaults::allow_force(),
            min_reason_length: defaults::min_reason_length(),
        }
    }
}

// ---------------------------------------------------------------------------
// [execution]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSection {
    #[serde(default = "defaults::default_dry_run", deserialize_with = "lenient::bool_default_false")]
    pub default_dry_run: bool,

    #[serde(default = "defaults::napcat_host", deserialize_with = "lenient::string_like")]
    pub napcat_host: String,

    #[serde(default = "defaults::napcat_port", deserialize_with = "lenient::port")]
    pub napcat_port: u16,

    /// Sent as `Authorization: Bearer <token>` when non-empty.
    #[serde(default, deserialize_with = "lenient::string_like")]
    pub napcat_token: String,

    #[serde(default = "defaults::timeout_secs", deserialize_with = "lenient::u64_like")]
    pub timeout_secs: u64,
}

impl Default for ExecutionSection {
    fn default() -> Self {
        Self {
            default_dry_run: defaults::default_dry_run(),
            napcat_host: defaults::napcat_host(),
            napcat_port: defaults::napcat_port(),
            napcat_token: String::new(),
            timeout_secs: defaults::timeout_secs(),
        }
    }
}

// ---------------------------------------------------------------------------
// [command]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSection {
    /// Informational only: the interpreter always matches `/ldg`.
    #[serde(default = "defaults::prefix", deserialize_with = "lenient::string_like")]
    pub prefix: String,

    /// Restrict the whole `/ldg` surface to the developer whitelist.
    #[serde(default = "defaults::whitelist_only", deserialize_with = "lenient::bool_default_true")]
    pub whitelist_only: bool,
}

impl Default for CommandSection {
    fn default() -> Self {
        Self {
            prefix: defaults::prefix(),
            whitelist_only: defaults::whitelist_only(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg: GuardConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, GuardConfig::default());
        assert!(cfg.plugin.enabled);
        assert_eq!(cfg.security_mode(), SecurityMode::Cautious);
        assert_eq!(cfg.security.min_reason_length, 4);
        assert_eq!(cfg.napcat_base_url(), "http://127.0.0.1:3000");
        assert_eq!(cfg.command.prefix, "/ldg");
    }

    #[test]
    fn host_generated_file_parses() {
        let cfg: GuardConfig = toml::from_str(
            r#"
            [plugin]
            enabled = true
            config_version = "1.0.0"

            [security]
            mode = "normal"
            developer_whitelist = ["10001", 10002]
            allow_force = "off"

            [execution]
            default_dry_run = "yes"
            napcat_host = "napcat.local"
            napcat_port = "3100"
            napcat_token = "secret"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.security_mode(), SecurityMode::Normal);
        assert_eq!(cfg.security.developer_whitelist, vec!["10001", "10002"]);
        assert!(!cfg.security.allow_force);
        assert!(cfg.execution.default_dry_run);
        assert_eq!(cfg.napcat_base_url(), "http://napcat.local:3100");
    }

    #[test]
    fn unknown_mode_is_cautious() {
        let cfg: GuardConfig = toml::from_str("[security]\nmode = \"lax\"\n").unwrap();
        assert_eq!(cfg.security_mode(), SecurityMode::Cautious);
    }
}
