use thiserror::Error;

/// Reasons an action cannot be bound to the chat it was triggered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("unsupported action type: {0}")]
    UnsupportedAction(String),

    #[error("not a group chat, refusing to leave")]
    NotGroup,

    #[error("group id missing from context, refusing to leave")]
    GroupIdMissing,

    #[error("current chat is a group, refusing to delete friend")]
    IsGroup,

    #[error("private chat peer missing, refusing to delete friend")]
    PeerMissing,
}

/// Top-level error type for the guard runtime.
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("host bridge error: {0}")]
    HostError(String),
}
