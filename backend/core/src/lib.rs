pub mod error;
pub mod result;
pub mod session;
pub mod types;

pub use error::{ContextError, GuardError};
pub use result::{GuardResult, Outcome};
pub use session::GuardSession;
pub use types::{
    normalize_reason, ActionKind, ActionRequest, ActionSource, ChatContext, SecurityMode, Target,
};
