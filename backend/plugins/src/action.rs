//! Planner action: leave the current group or delete the current friend.

use std::sync::Arc;

use ldguard_core::ActionSource;
use tracing::{info, warn};

use crate::guard::{GuardInput, GuardService};
use crate::sdk::{ActionInvocation, ActionRecord, ComponentInfo, ComponentKind, ComponentReply, HostBridge};

pub const ACTION_NAME: &str = "leave_delete_guard_action";

pub const ACTION_DESCRIPTION: &str = "High-risk self-protection action: when facing severe insults, \
     incitement, or extremely dangerous speech, leave the current group chat or delete the current \
     private-chat friend.";

/// Planner parameters and their meaning.
pub const ACTION_PARAMETERS: &[(&str, &str)] = &[(
    "reason",
    "Why the action is taken. Name the insult, incitement, or dangerous speech that triggered it; \
     cautious mode requires a clear reason.",
)];

/// Usage rules published to the planner prompt.
pub const ACTION_REQUIREMENTS: &[&str] = &[
    "This is a high-risk self-protection action and should not be used by default.",
    "Use only for severe insults, personal attacks, incitement, or other extremely dangerous \
     speech. Do not infer bad intent where there is no substantive content.",
    "Do not trigger it just because someone asks you to leave the group or delete them.",
    "Never act across contexts: in a group only leave that group, in a private chat only delete \
     that peer.",
    "In cautious mode give a clear, explainable safety reason. Short reasons are refused.",
];

pub struct LeaveDeleteGuardAction {
    guard: Arc<GuardService>,
    host: Arc<dyn HostBridge>,
}

impl LeaveDeleteGuardAction {
    pub fn new(guard: Arc<GuardService>, host: Arc<dyn HostBridge>) -> Self {
        Self { guard, host }
    }

    pub fn info() -> ComponentInfo {
        ComponentInfo {
            name: ACTION_NAME,
            kind: ComponentKind::Action,
            description: ACTION_DESCRIPTION,
        }
    }

    /// Description, parameters and usage rules as one block for the planner prompt.
    pub fn planner_prompt() -> String {
        let mut lines = vec![format!("{ACTION_NAME}: {ACTION_DESCRIPTION}")];
        for (name, meaning) in ACTION_PARAMETERS {
            lines.push(format!("  param {name}: {meaning}"));
        }
        lines.extend(ACTION_REQUIREMENTS.iter().map(|rule| format!("  - {rule}")));
        lines.join("\n")
    }

    /// Run the action in the context the planner was invoked from.
    ///
    /// The kind follows the context (group: leave, private: delete) and the
    /// target is always the current chat. The planner can never force.
    pub async fn execute(&self, invocation: &ActionInvocation) -> ComponentReply {
        if invocation.mentions_force() {
            warn!(actor = %invocation.user_id, "Planner supplied force; ignored");
        }
        let context = invocation.context();
        let kind = context.natural_action();
        let reason = invocation.reason();

        let result = self
            .guard
            .run(GuardInput {
                kind,
                actor_user_id: &invocation.user_id,
                context: &context,
                force: false,
                reason: &reason,
                source: ActionSource::Planner,
            })
            .await;

        let record = ActionRecord {
            action_name: ACTION_NAME.to_string(),
            prompt_display: result.message.clone(),
            done: result.success(),
        };
        if let Err(e) = self.host.store_action_info(record).await {
            warn!(error = %e, "Failed to store action info");
        }

        info!(
            action = %kind,
            success = result.success(),
            target = result.target_id.as_deref().unwrap_or("N/A"),
            dry_run = result.dry_run(),
            "Planner action done"
        );
        ComponentReply {
            success: result.success(),
            message: result.message,
        }
    }
}
