//! Classify a raw chat line as an `/ldg` command.
use ldguard_core::ActionKind;

use crate::registry::PREFIX;
use crate::types::{LdgCommand, ParseProblem};

/// Classify `text` as an `/ldg` command.
///
/// Returns `None` if the line does not start with the `/ldg` token, so the
/// host can route it elsewhere. Every line that does start with it is
/// classified; malformed input becomes `LdgCommand::Unknown`.
pub fn detect_command(text: &str) -> Option<LdgCommand> {
    let mut parts = text.split_whitespace();
    if parts.next()? != PREFIX {
        return None;
    }

    let rest: Vec<String> = parts.map(str::to_lowercase).collect();
    let (subcommand, arg) = match rest.as_slice() {
        [] => return Some(LdgCommand::Help),
        [sub] => (sub.as_str(), None),
        [sub, arg] => (sub.as_str(), Some(arg.as_str())),
        [sub, ..] if sub == "help" => return Some(LdgCommand::Help),
        _ => return Some(LdgCommand::Unknown(ParseProblem::TooManyArgs)),
    };

    Some(match (subcommand, arg) {
        ("help", _) => LdgCommand::Help,
        ("dryrun", Some("on")) => LdgCommand::DryRun { on: true },
        ("dryrun", Some("off")) => LdgCommand::DryRun { on: false },
        ("dryrun", _) => LdgCommand::Unknown(ParseProblem::DryRunArg),
        (other, arg) => match (other.parse::<ActionKind>(), arg) {
            (Ok(kind), None) => LdgCommand::Action { kind, force: false },
            (Ok(kind), Some("force")) => LdgCommand::Action { kind, force: true },
            (Ok(_), Some(arg)) => LdgCommand::Unknown(ParseProblem::ActionArg {
                subcommand: other.to_string(),
                arg: arg.to_string(),
            }),
            (Err(_), _) => {
                LdgCommand::Unknown(ParseProblem::UnknownSubcommand(other.to_string()))
            }
        },
    })
}
