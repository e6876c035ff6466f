pub mod gate;
pub mod whitelist;

pub use gate::{Cleared, Decision, Denied, DenyReason, PolicyGate, SecurityPolicy, decide};
pub use whitelist::DeveloperWhitelist;
