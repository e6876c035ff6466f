//! `/ldg` command types.
use std::fmt;

use ldguard_core::ActionKind;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Command definition
// ---------------------------------------------------------------------------

/// One subcommand entry in the registry, used to render help.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDef {
    /// Subcommand keyword (e.g. "leave").
    pub key: String,
    /// Usage line without the prefix (e.g. "leave [force]").
    pub usage: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Parsed invocation
// ---------------------------------------------------------------------------

/// Why a `/ldg` line could not be classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseProblem {
    TooManyArgs,
    UnknownSubcommand(String),
    /// `dryrun` without `on` or `off`.
    DryRunArg,
    /// `leave`/`delete` followed by something other than `force`.
    ActionArg { subcommand: String, arg: String },
}

impl fmt::Display for ParseProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseProblem::TooManyArgs => write!(f, "too many arguments"),
            ParseProblem::UnknownSubcommand(sub) => write!(f, "unknown subcommand `{sub}`"),
            ParseProblem::DryRunArg => write!(f, "dryrun expects `on` or `off`"),
            ParseProblem::ActionArg { subcommand, arg } => write!(
                f,
                "`{subcommand}` only accepts the optional argument `force` (got `{arg}`)"
            ),
        }
    }
}

/// A classified `/ldg` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LdgCommand {
    Help,
    /// `leave [force]` or `delete [force]`.
    Action { kind: ActionKind, force: bool },
    DryRun { on: bool },
    Unknown(ParseProblem),
}

impl LdgCommand {
    /// The guarded action this command requests, with its force flag.
    pub fn action(&self) -> Option<(ActionKind, bool)> {
        match *self {
            LdgCommand::Action { kind, force } => Some((kind, force)),
            _ => None,
        }
    }
}
