//! Host SDK seam.
//!
//! The chat host (message routing, planner, reply transport) is an external
//! collaborator. The plugin only sees it through [`HostBridge`] and the
//! invocation structs below.

use async_trait::async_trait;
use ldguard_config::parse_bool_like;
use ldguard_core::{ChatContext, GuardError, normalize_reason};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Entry written back into the host's action history after a planner action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub action_name: String,
    /// Text the host shows the planner on its next turn.
    pub prompt_display: String,
    pub done: bool,
}

/// Reply channel back into the host.
#[async_trait]
pub trait HostBridge: Send + Sync {
    /// Send a text reply to the chat the current event came from.
    async fn send_text(&self, text: &str) -> Result<(), GuardError>;

    async fn store_action_info(&self, record: ActionRecord) -> Result<(), GuardError>;
}

/// A chat line routed to the debug command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub text: String,
    pub sender_id: String,
    pub is_group: bool,
    pub group_id: Option<String>,
}

impl InboundMessage {
    pub fn context(&self) -> ChatContext {
        ChatContext::from_host(self.is_group, self.group_id.as_deref(), Some(&self.sender_id))
    }
}

/// A planner decision to run the guard action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionInvocation {
    pub user_id: String,
    pub is_group: bool,
    pub group_id: Option<String>,
    /// Free-form parameters chosen by the planner (`reason`, ...).
    #[serde(default)]
    pub action_data: Value,
    /// The planner's own explanation for choosing this action.
    #[serde(default)]
    pub reasoning: String,
}

impl ActionInvocation {
    pub fn context(&self) -> ChatContext {
        ChatContext::from_host(self.is_group, self.group_id.as_deref(), Some(&self.user_id))
    }

    /// `action_data.reason`, falling back to the planner's reasoning.
    pub fn reason(&self) -> String {
        let from_data = match self.action_data.get("reason") {
            Some(Value::String(s)) => normalize_reason(Some(s)),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        if from_data.is_empty() {
            normalize_reason(Some(&self.reasoning))
        } else {
            from_data
        }
    }

    /// Whether the planner tried to pass `force`. It is never honored.
    pub fn mentions_force(&self) -> bool {
        match self.action_data.get("force") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => parse_bool_like(s).unwrap_or(true),
            Some(_) => true,
        }
    }
}

/// What a component returns to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentReply {
    pub success: bool,
    pub message: String,
}

impl ComponentReply {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Action,
    Command,
}

/// Registration entry for one plugin component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentInfo {
    pub name: &'static str,
    pub kind: ComponentKind,
    pub description: &'static str,
}
