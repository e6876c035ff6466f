//! `init-config` and `check-config`.

use std::path::Path;

use anyhow::{bail, Result};
use ldguard_config::{load_resolved, redacted_snapshot, validate, write_config, GuardConfig, ValidationReport};

use crate::terminal_output::{note, render_table, Tone};

/// Write the default config to `path`. Refuses to overwrite unless `force`.
pub async fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists; pass --force to overwrite it", path.display());
    }
    write_config(&GuardConfig::default(), path).await?;
    note(Tone::Success, &format!("Wrote default config to {}", path.display()));
    Ok(())
}

fn report_rows(report: &ValidationReport) -> Vec<Vec<String>> {
    let errors = report.errors.iter().map(|e| ("error", e));
    let warnings = report.warnings.iter().map(|w| ("warn", w));
    errors
        .chain(warnings)
        .map(|(level, finding)| vec![level.to_string(), finding.path.clone(), finding.message.clone()])
        .collect()
}

/// Load and validate `path`, print findings and the redacted config.
pub async fn check(path: &Path) -> Result<()> {
    if !path.exists() {
        note(Tone::Info, &format!("{} not found; checking defaults", path.display()));
    }
    let config = load_resolved(path).await?;
    let report = validate(&config);

    let rows = report_rows(&report);
    if !rows.is_empty() {
        println!("{}\n", render_table(&["level", "path", "message"], &rows));
    }
    println!("{}", serde_json::to_string_pretty(&redacted_snapshot(&config))?);

    if !report.is_valid() {
        bail!("{} config error(s) in {}", report.errors.len(), path.display());
    }
    if report.warnings.is_empty() {
        note(Tone::Success, "Config is valid");
    } else {
        note(Tone::Warn, &format!("Config is valid with {} warning(s)", report.warnings.len()));
    }
    Ok(())
}
