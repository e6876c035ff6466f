//! Policy gate. Decides whether a destructive action may proceed.
//!
//! The decision itself (`decide`) is a pure function of the policy and the
//! request fields; `PolicyGate::evaluate` wraps it with logging and the
//! typed hand-off to the executor.
use std::fmt;

use ldguard_config::GuardConfig;
use ldguard_core::{ActionRequest, SecurityMode};
use serde::Serialize;
use tracing::{info, warn};

use crate::whitelist::DeveloperWhitelist;

/// Gate inputs taken from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityPolicy {
    pub mode: SecurityMode,
    pub whitelist: DeveloperWhitelist,
    pub allow_force: bool,
    pub min_reason_length: usize,
}

impl Default for SecurityPolicy {
    fn default() -> Self {
        Self::from_config(&GuardConfig::default())
    }
}

impl SecurityPolicy {
    pub fn from_config(config: &GuardConfig) -> Self {
        Self {
            mode: config.security_mode(),
            whitelist: DeveloperWhitelist::new(&config.security.developer_whitelist),
            allow_force: config.security.allow_force,
            min_reason_length: config.security.min_reason_length,
        }
    }

    /// `force` is honored only for whitelisted users when force is enabled.
    pub fn honors_force(&self, actor_user_id: &str) -> bool {
        self.allow_force && self.whitelist.contains(actor_user_id)
    }
}

/// Why the gate refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DenyReason {
    ReasonTooShort { min: usize, actual: usize },
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::ReasonTooShort { min, actual } => write!(
                f,
                "cautious mode refused: reason must be at least {min} characters (got {actual})"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow { force_honored: bool },
    Deny(DenyReason),
}

/// Pure policy decision.
///
/// In cautious mode a trimmed reason shorter than the minimum is refused no
/// matter who asks. A `force` the caller may not use is dropped, not refused.
pub fn decide(policy: &SecurityPolicy, actor_user_id: &str, reason: &str, force: bool) -> Decision {
    let actual = reason.trim().chars().count();
    if policy.mode == SecurityMode::Cautious && actual < policy.min_reason_length {
        return Decision::Deny(DenyReason::ReasonTooShort {
            min: policy.min_reason_length,
            actual,
        });
    }
    Decision::Allow {
        force_honored: force && policy.honors_force(actor_user_id),
    }
}

/// A request the gate has allowed. Only the gate can construct one.
#[derive(Debug, Clone)]
pub struct Cleared {
    request: ActionRequest,
    force_honored: bool,
}

impl Cleared {
    pub fn force_honored(&self) -> bool {
        self.force_honored
    }

    pub fn into_request(self) -> ActionRequest {
        self.request
    }
}

/// A request the gate refused.
#[derive(Debug, Clone)]
pub struct Denied {
    pub request: ActionRequest,
    pub reason: DenyReason,
}

pub struct PolicyGate {
    policy: SecurityPolicy,
}

impl PolicyGate {
    pub fn new(policy: SecurityPolicy) -> Self {
        Self { policy }
    }

    pub fn evaluate(&self, request: ActionRequest) -> Result<Cleared, Denied> {
        match decide(
            &self.policy,
            &request.actor_user_id,
            &request.reason,
            request.force_requested,
        ) {
            Decision::Allow { force_honored } => {
                if request.force_requested && !force_honored {
                    warn!(
                        request_id = %request.id,
                        actor = %request.actor_user_id,
                        allow_force = self.policy.allow_force,
                        "[PolicyGate] force ignored for this caller"
                    );
                }
                info!(
                    request_id = %request.id,
                    action = %request.kind,
                    source = %request.source,
                    force = force_honored,
                    "[PolicyGate] allowed"
                );
                Ok(Cleared { request, force_honored })
            }
            Decision::Deny(reason) => {
                warn!(
                    request_id = %request.id,
                    action = %request.kind,
                    source = %request.source,
                    reason = %reason,
                    "[PolicyGate] denied"
                );
                Err(Denied { request, reason })
            }
        }
    }
}
