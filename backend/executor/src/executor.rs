use std::sync::Arc;

use ldguard_core::{GuardResult, Outcome};
use ldguard_logging::redact_sensitive_data;
use ldguard_security::Cleared;
use tracing::{error, info};

use crate::napcat::NapcatApi;

/// Performs (or simulates) an action the policy gate has cleared.
///
/// Exactly one NapCat call per non-dry-run request; failures are reported,
/// never retried.
pub struct ActionExecutor {
    api: Arc<dyn NapcatApi>,
}

impl ActionExecutor {
    pub fn new(api: Arc<dyn NapcatApi>) -> Self {
        Self { api }
    }

    pub async fn execute(&self, cleared: Cleared) -> GuardResult {
        let force = cleared.force_honored();
        let request = cleared.into_request();
        let target = request.target().clone();
        let mut result = GuardResult {
            request_id: Some(request.id),
            outcome: Outcome::Simulated,
            message: String::new(),
            action: Some(request.kind),
            target_id: Some(target.id().to_string()),
            source: request.source,
            response: None,
        };

        if request.dry_run {
            let reason = if request.reason.is_empty() { "N/A" } else { request.reason.as_str() };
            result.message = format!(
                "[dry-run] checks passed, would execute {} -> {}; source={}; force={}; reason={}",
                request.kind,
                target.id(),
                request.source,
                force,
                reason
            );
            info!(request_id = %request.id, action = %request.kind, target = %target.id(), "Simulated action");
            return result;
        }

        let endpoint = request.kind.endpoint();
        info!(request_id = %request.id, endpoint, target = %target.id(), "Executing action");
        match self.api.call(endpoint, &target.payload()).await {
            Ok(raw) => {
                result.outcome = Outcome::Executed;
                result.message = format!("{} executed, target={}", request.kind, target.id());
                result.response = Some(raw);
            }
            Err(e) => {
                let detail = redact_sensitive_data(&e.to_string());
                error!(request_id = %request.id, endpoint, error = %detail, "Action execution failed");
                result.outcome = Outcome::Failed;
                result.message = format!("{} failed: {}", request.kind, detail);
                result.response = e.raw().cloned();
            }
        }
        result
    }
}
