//! Config validation: field-level checks with user-friendly messages.

use ldguard_core::SecurityMode;
use thiserror::Error;

use crate::defaults::COMMAND_PREFIX;
use crate::schema::GuardConfig;

/// A config validation finding with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All findings from one validation pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &GuardConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_security(config, &mut report);
    validate_execution(config, &mut report);
    validate_command(config, &mut report);
    report
}

fn validate_security(config: &GuardConfig, report: &mut ValidationReport) {
    let security = &config.security;
    if SecurityMode::parse(&security.mode).is_none() {
        report.warn(
            "security.mode",
            format!("Unknown mode '{}'; falling back to cautious", security.mode),
        );
    }
    if config.security_mode() == SecurityMode::Cautious && security.min_reason_length == 0 {
        report.warn(
            "security.min_reason_length",
            "Cautious mode with min_reason_length = 0 accepts empty reasons",
        );
    }
    if security.allow_force && security.developer_whitelist.is_empty() {
        report.warn(
            "security.developer_whitelist",
            "allow_force is on but the whitelist is empty; force will never be honored",
        );
    }
}

fn validate_execution(config: &GuardConfig, report: &mut ValidationReport) {
    let execution = &config.execution;
    if execution.napcat_host.trim().is_empty() {
        report.error("execution.napcat_host", "NapCat host cannot be empty");
    }
    if execution.napcat_port == 0 {
        report.error("execution.napcat_port", "NapCat port must be between 1 and 65535");
    }
    if execution.timeout_secs == 0 {
        report.error("execution.timeout_secs", "timeout_secs must be >= 1");
    }
}

fn validate_command(config: &GuardConfig, report: &mut ValidationReport) {
    let command = &config.command;
    if command.prefix.trim() != COMMAND_PREFIX {
        report.warn(
            "command.prefix",
            format!(
                "Prefix '{}' is not supported; commands still match {COMMAND_PREFIX}",
                command.prefix
            ),
        );
    }
    if command.whitelist_only && config.security.developer_whitelist.is_empty() {
        report.warn(
            "command.whitelist_only",
            "Debug commands are whitelist-only but the whitelist is empty",
        );
    }
}
