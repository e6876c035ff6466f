//! Logging components for the guard plugin.
//!
//! Handles subscriber setup, token redaction, and per-invocation guard events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogger, GuardEvent};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
