use std::path::PathBuf;

/// Process-level settings for the `ldguard` binary. Plugin behaviour lives in
/// the TOML config; these only control where and how loudly it logs.
#[derive(Debug, Clone)]
pub struct CliSettings {
    /// Level used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Directory for the daily JSON log file. Console-only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl CliSettings {
    /// Read `LDGUARD_LOG` and `LDGUARD_LOG_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: lookup("LDGUARD_LOG")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.log_level),
            log_dir: lookup("LDGUARD_LOG_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        let settings = CliSettings::from_lookup(|_| None);
        assert_eq!(settings.log_level, "info");
        assert!(settings.log_dir.is_none());
    }

    #[test]
    fn reads_overrides_and_skips_blank() {
        let settings = CliSettings::from_lookup(|key| match key {
            "LDGUARD_LOG" => Some("debug".into()),
            "LDGUARD_LOG_DIR" => Some("  ".into()),
            _ => None,
        });
        assert_eq!(settings.log_level, "debug");
        assert!(settings.log_dir.is_none());
    }
}
