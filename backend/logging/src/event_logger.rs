//! Guard Event Logger
//!
//! One structured record per guarded invocation, emitted through `tracing` so
//! the JSON file layer captures it as NDJSON.

use chrono::{DateTime, Utc};
use ldguard_core::{ActionKind, ActionSource, GuardResult, Outcome};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Serialize)]
pub struct GuardEvent {
    pub request_id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
    pub source: ActionSource,
    pub action: Option<ActionKind>,
    pub target_id: Option<String>,
    pub outcome: Outcome,
    pub detail: String,
}

impl GuardEvent {
    pub fn from_result(result: &GuardResult) -> Self {
        Self {
            request_id: result.request_id,
            timestamp: Utc::now(),
            source: result.source,
            action: result.action,
            target_id: result.target_id.clone(),
            outcome: result.outcome,
            detail: redact_sensitive_data(&result.message),
        }
    }
}

pub struct EventLogger;

impl EventLogger {
    /// Log the outcome of one invocation.
    pub fn log_result(result: &GuardResult) -> GuardEvent {
        let event = GuardEvent::from_result(result);
        let json = serde_json::to_string(&event).unwrap_or_default();
        info!(target: "guard_events", event = %json, "Guard event");
        event
    }
}
