//! Subcommand registry for the `/ldg` debug surface.
use crate::types::CommandDef;

/// The only prefix the interpreter matches.
pub const PREFIX: &str = "/ldg";

fn def(key: &str, usage: &str, description: &str) -> CommandDef {
    CommandDef {
        key: key.to_string(),
        usage: usage.to_string(),
        description: description.to_string(),
    }
}

/// Build the built-in subcommand list.
pub fn builtin_commands() -> Vec<CommandDef> {
    vec![
        def("help", "help", "Show this help."),
        def("leave", "leave [force]", "Leave the current group (group chats only)."),
        def("delete", "delete [force]", "Delete the current private-chat friend (private chats only)."),
        def("dryrun", "dryrun on|off", "Set the in-process dry-run override."),
    ]
}

pub struct CommandRegistry {
    commands: Vec<CommandDef>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self { commands: builtin_commands() }
    }

    /// Help text listing every subcommand.
    pub fn help_text(&self) -> String {
        let mut lines = vec!["leave_delete_guard debug commands".to_string()];
        let width = self.commands.iter().map(|c| c.usage.len()).max().unwrap_or(0);
        for cmd in &self.commands {
            lines.push(format!(
                "{PREFIX} {:<width$}  # {}",
                cmd.usage, cmd.description
            ));
        }
        lines.push("Note: only developer_whitelist users may use these commands.".to_string());
        lines.join("\n")
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
