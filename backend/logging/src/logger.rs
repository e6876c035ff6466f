//! Structured Logger
//!
//! Wraps `tracing` to provide console output, an optional daily-rolling NDJSON
//! file, and environment-based level control.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file prefix inside the log directory.
const LOG_FILE_NAME: &str = "ldguard.log";

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Daily-rolling appender in `dir`, or `None` when the directory is unusable.
fn file_appender(dir: &Path) -> Option<RollingFileAppender> {
    match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_NAME)
        .build(dir)
    {
        Ok(appender) => Some(appender),
        Err(e) => {
            eprintln!(
                "warning: cannot log to {}: {e}; continuing with console only",
                dir.display()
            );
            None
        }
    }
}

/// Initialize the global logger.
///
/// `RUST_LOG` overrides `level`. With `log_dir` set, a JSON file layer writes
/// `ldguard.log.YYYY-MM-DD` there; an unusable directory falls back to
/// console-only output. Calling twice is a no-op.
pub fn init_logger(log_dir: Option<&Path>, level: &str) {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    let file_layer = log_dir.and_then(file_appender).map(|appender| {
        fmt::layer()
            .json()
            .with_writer(appender)
            .with_ansi(false)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unusable_log_dir_falls_back_to_console() {
        let base = std::env::temp_dir().join(format!("ldguard-log-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&base).unwrap();
        assert!(file_appender(&base).is_some());

        let blocker = base.join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();
        assert!(file_appender(&blocker).is_none());
        assert!(file_appender(&blocker.join("nested")).is_none());

        init_logger(Some(&blocker), "info");
        std::fs::remove_dir_all(&base).ok();
    }
}
