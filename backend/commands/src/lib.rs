pub mod detection;
pub mod registry;
pub mod types;

pub use detection::detect_command;
pub use registry::{builtin_commands, CommandRegistry, PREFIX};
pub use types::{CommandDef, LdgCommand, ParseProblem};
