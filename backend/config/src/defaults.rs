//! Default values for every config key.
//!
//! The serde `default = "..."` hooks in `schema` point at the functions here.

/// Version written into freshly generated config files.
pub const CONFIG_VERSION: &str = "1.0.0";

/// The only command prefix the interpreter matches.
pub const COMMAND_PREFIX: &str = "/ldg";

pub const DEFAULT_NAPCAT_HOST: &str = "127.0.0.1";
pub const DEFAULT_NAPCAT_PORT: u16 = 3000;

/// Minimum reason length (characters) required in cautious mode.
pub const DEFAULT_MIN_REASON_LENGTH: usize = 4;

/// NapCat request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub(crate) fn enabled() -> bool {
    true
}

pub(crate) fn config_version() -> String {
    CONFIG_VERSION.to_string()
}

pub(crate) fn mode() -> String {
    "cautious".to_string()
}

pub(crate) fn allow_force() -> bool {
    true
}

pub(crate) fn min_reason_length() -> usize {
    DEFAULT_MIN_REASON_LENGTH
}

pub(crate) fn default_dry_run() -> bool {
    false
}

pub(crate) fn napcat_host() -> String {
    DEFAULT_NAPCAT_HOST.to_string()
}

pub(crate) fn napcat_port() -> u16 {
    DEFAULT_NAPCAT_PORT
}

pub(crate) fn timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

pub(crate) fn prefix() -> String {
    COMMAND_PREFIX.to_string()
}

pub(crate) fn whitelist_only() -> bool {
    true
}
