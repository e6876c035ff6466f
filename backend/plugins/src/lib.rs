//! Leave/delete guard plugin.
//!
//! Two host components share one guarded path (bind to the current chat,
//! policy gate, NapCat executor):
//! - a planner action that leaves the current group or deletes the current friend
//! - the `/ldg` developer debug command

pub mod action;
pub mod command;
pub mod guard;
pub mod lifecycle;
pub mod sdk;

pub use action::{ACTION_NAME, LeaveDeleteGuardAction};
pub use command::{COMMAND_NAME, LeaveDeleteGuardCommand};
pub use guard::{GuardInput, GuardService, SharedSession};
pub use lifecycle::{LeaveDeleteGuardPlugin, PLUGIN_NAME, PluginState};
pub use sdk::{
    ActionInvocation, ActionRecord, ComponentInfo, ComponentKind, ComponentReply, HostBridge,
    InboundMessage,
};
