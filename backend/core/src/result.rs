use serde::Serialize;
use uuid::Uuid;

use crate::types::{ActionKind, ActionSource};

/// How a guarded invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The NapCat call succeeded.
    Executed,
    /// Dry-run: all checks passed, call suppressed.
    Simulated,
    /// The policy gate refused the request.
    Denied,
    /// The request could not be bound to the current chat.
    Rejected,
    /// The NapCat call failed.
    Failed,
}

/// Result reported back to the chat and the planner. Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct GuardResult {
    pub request_id: Option<Uuid>,
    pub outcome: Outcome,
    pub message: String,
    pub action: Option<ActionKind>,
    pub target_id: Option<String>,
    pub source: ActionSource,
    /// Body returned by NapCat, when there was one.
    pub response: Option<serde_json::Value>,
}

impl GuardResult {
    pub fn success(&self) -> bool {
        matches!(self.outcome, Outcome::Executed | Outcome::Simulated)
    }

    pub fn executed(&self) -> bool {
        self.outcome == Outcome::Executed
    }

    pub fn dry_run(&self) -> bool {
        self.outcome == Outcome::Simulated
    }

    /// Multi-line report for the debug command reply.
    pub fn report(&self) -> String {
        format!(
            "[ldg] success={}\naction={}\ntarget={}\ndry_run={}\nexecuted={}\ndetail={}",
            self.success(),
            self.action.map(|a| a.as_str()).unwrap_or("N/A"),
            self.target_id.as_deref().unwrap_or("N/A"),
            self.dry_run(),
            self.executed(),
            self.message,
        )
    }
}
