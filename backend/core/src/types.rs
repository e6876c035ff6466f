use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ContextError;

/// The two irreversible actions the guard can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Leave the current group chat.
    Leave,
    /// Delete the current private-chat friend.
    Delete,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Leave => "leave",
            ActionKind::Delete => "delete",
        }
    }

    /// NapCat HTTP endpoint that performs this action.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ActionKind::Leave => "set_group_leave",
            ActionKind::Delete => "delete_friend",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "leave" => Ok(ActionKind::Leave),
            "delete" => Ok(ActionKind::Delete),
            _ => Err(ContextError::UnsupportedAction(s.to_string())),
        }
    }
}

/// Where an invocation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionSource {
    Planner,
    Command,
}

impl ActionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionSource::Planner => "planner",
            ActionSource::Command => "command",
        }
    }
}

impl fmt::Display for ActionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Security mode of the policy gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityMode {
    /// A sufficiently long reason is required.
    #[default]
    Cautious,
    /// No minimum reason length.
    Normal,
}

impl SecurityMode {
    /// Parse a configured mode; `None` for anything other than `cautious`/`normal`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "cautious" => Some(SecurityMode::Cautious),
            "normal" => Some(SecurityMode::Normal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityMode::Cautious => "cautious",
            SecurityMode::Normal => "normal",
        }
    }
}

/// The chat an event arrived on, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChatContext {
    Group { group_id: Option<String> },
    Private { peer_id: Option<String> },
}

impl ChatContext {
    /// Build a context from host fields. Blank ids are treated as missing.
    pub fn from_host(is_group: bool, group_id: Option<&str>, user_id: Option<&str>) -> Self {
        let clean = |id: Option<&str>| {
            id.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        if is_group {
            ChatContext::Group { group_id: clean(group_id) }
        } else {
            ChatContext::Private { peer_id: clean(user_id) }
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, ChatContext::Group { .. })
    }

    /// The action the planner may take in this context.
    pub fn natural_action(&self) -> ActionKind {
        if self.is_group() {
            ActionKind::Leave
        } else {
            ActionKind::Delete
        }
    }

    /// Resolve the only target `kind` may act on here.
    pub fn target_for(&self, kind: ActionKind) -> Result<Target, ContextError> {
        match (kind, self) {
            (ActionKind::Leave, ChatContext::Group { group_id: Some(id) }) => {
                Ok(Target::Group(id.clone()))
            }
            (ActionKind::Leave, ChatContext::Group { group_id: None }) => {
                Err(ContextError::GroupIdMissing)
            }
            (ActionKind::Leave, ChatContext::Private { .. }) => Err(ContextError::NotGroup),
            (ActionKind::Delete, ChatContext::Group { .. }) => Err(ContextError::IsGroup),
            (ActionKind::Delete, ChatContext::Private { peer_id: Some(id) }) => {
                Ok(Target::Friend(id.clone()))
            }
            (ActionKind::Delete, ChatContext::Private { peer_id: None }) => {
                Err(ContextError::PeerMissing)
            }
        }
    }
}

/// A resolved action target. Only obtainable through [`ChatContext::target_for`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Target {
    Group(String),
    Friend(String),
}

impl Target {
    pub fn id(&self) -> &str {
        match self {
            Target::Group(id) | Target::Friend(id) => id,
        }
    }

    /// JSON body for the NapCat endpoint that acts on this target.
    pub fn payload(&self) -> serde_json::Value {
        match self {
            Target::Group(id) => serde_json::json!({ "group_id": id, "is_dismiss": false }),
            Target::Friend(id) => serde_json::json!({ "user_id": id }),
        }
    }
}

/// Trim a free-text reason; absent becomes empty.
pub fn normalize_reason(reason: Option<&str>) -> String {
    reason.map(str::trim).unwrap_or_default().to_string()
}

/// One guarded invocation. Discarded once a result is produced.
#[derive(Debug, Clone, Serialize)]
pub struct ActionRequest {
    pub id: Uuid,
    pub kind: ActionKind,
    pub actor_user_id: String,
    target: Target,
    pub force_requested: bool,
    pub reason: String,
    pub source: ActionSource,
    pub dry_run: bool,
}

impl ActionRequest {
    /// Bind a request to the chat it was triggered from.
    pub fn bind(
        kind: ActionKind,
        actor_user_id: impl Into<String>,
        context: &ChatContext,
        source: ActionSource,
    ) -> Result<Self, ContextError> {
        let target = context.target_for(kind)?;
        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            actor_user_id: actor_user_id.into().trim().to_string(),
            target,
            force_requested: false,
            reason: String::new(),
            source,
            dry_run: false,
        })
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force_requested = force;
        self
    }

    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = normalize_reason(Some(reason));
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Reason length in characters, as the policy gate measures it.
    pub fn reason_len(&self) -> usize {
        self.reason.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leave_binds_to_current_group() {
        let ctx = ChatContext::from_host(true, Some("123"), Some("42"));
        let req = ActionRequest::bind(ActionKind::Leave, "42", &ctx, ActionSource::Command).unwrap();
        assert_eq!(req.target(), &Target::Group("123".to_string()));
    }

    #[test]
    fn delete_binds_to_private_peer_not_group() {
        let ctx = ChatContext::from_host(false, Some("999"), Some("42"));
        let req = ActionRequest::bind(ActionKind::Delete, "42", &ctx, ActionSource::Planner).unwrap();
        assert_eq!(req.target(), &Target::Friend("42".to_string()));
    }

    #[test]
    fn context_mismatch_is_rejected() {
        let group = ChatContext::from_host(true, Some("123"), Some("42"));
        let private = ChatContext::from_host(false, None, Some("42"));
        assert_eq!(group.target_for(ActionKind::Delete), Err(ContextError::IsGroup));
        assert_eq!(private.target_for(ActionKind::Leave), Err(ContextError::NotGroup));
    }

    #[test]
    fn blank_ids_count_as_missing() {
        let group = ChatContext::from_host(true, Some("  "), None);
        assert_eq!(group.target_for(ActionKind::Leave), Err(ContextError::GroupIdMissing));
        let private = ChatContext::from_host(false, None, Some(""));
        assert_eq!(private.target_for(ActionKind::Delete), Err(ContextError::PeerMissing));
    }

    #[test]
    fn action_kind_parses_case_insensitively() {
        assert_eq!(" LEAVE ".parse::<ActionKind>().unwrap(), ActionKind::Leave);
        assert_eq!("Delete".parse::<ActionKind>().unwrap(), ActionKind::Delete);
        assert!(matches!(
            "kick".parse::<ActionKind>(),
            Err(ContextError::UnsupportedAction(_))
        ));
    }

    #[test]
    fn reason_length_counts_characters() {
        let ctx = ChatContext::from_host(true, Some("1"), None);
        let req = ActionRequest::bind(ActionKind::Leave, "7", &ctx, ActionSource::Planner)
            .unwrap()
            .with_reason("  严重侮辱  ");
        assert_eq!(req.reason, "严重侮辱");
        assert_eq!(req.reason_len(), 4);
    }

    #[test]
    fn payloads_match_napcat_endpoints() {
        let leave = Target::Group("55".into());
        assert_eq!(leave.payload()["group_id"], "55");
        assert_eq!(leave.payload()["is_dismiss"], false);
        assert_eq!(Target::Friend("9".into()).payload()["user_id"], "9");
        assert_eq!(ActionKind::Leave.endpoint(), "set_group_leave");
        assert_eq!(ActionKind::Delete.endpoint(), "delete_friend");
    }

    #[test]
    fn security_mode_parse() {
        assert_eq!(SecurityMode::parse(" Normal"), Some(SecurityMode::Normal));
        assert_eq!(SecurityMode::parse("cautious"), Some(SecurityMode::Cautious));
        assert_eq!(SecurityMode::parse("paranoid"), None);
    }
}
