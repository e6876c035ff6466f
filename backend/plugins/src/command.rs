//! `/ldg` debug command component.

use std::sync::Arc;

use ldguard_commands::{CommandRegistry, LdgCommand, detect_command};
use ldguard_config::GuardConfig;
use ldguard_core::ActionSource;
use ldguard_security::DeveloperWhitelist;
use tracing::{info, warn};

use crate::guard::{GuardInput, GuardService};
use crate::sdk::{ComponentInfo, ComponentKind, ComponentReply, HostBridge, InboundMessage};

pub const COMMAND_NAME: &str = "leave_delete_guard_command";
pub const COMMAND_DESCRIPTION: &str =
    "Developer debug command for the leave/delete guard: /ldg help|leave|delete|dryrun on|off";

const PERMISSION_DENIED: &str =
    "Permission denied: /ldg is only available to developer_whitelist users.";

pub struct LeaveDeleteGuardCommand {
    guard: Arc<GuardService>,
    host: Arc<dyn HostBridge>,
    registry: CommandRegistry,
    whitelist: DeveloperWhitelist,
    whitelist_only: bool,
}

impl LeaveDeleteGuardCommand {
    pub fn new(config: &GuardConfig, guard: Arc<GuardService>, host: Arc<dyn HostBridge>) -> Self {
        Self {
            guard,
            host,
            registry: CommandRegistry::new(),
            whitelist: DeveloperWhitelist::new(&config.security.developer_whitelist),
            whitelist_only: config.command.whitelist_only,
        }
    }

    pub fn info() -> ComponentInfo {
        ComponentInfo {
            name: COMMAND_NAME,
            kind: ComponentKind::Command,
            description: COMMAND_DESCRIPTION,
        }
    }

    /// Handle one chat line.
    ///
    /// Returns `None` when the line is not an `/ldg` command, so the host can
    /// route it elsewhere. Otherwise the reply has already been sent.
    pub async fn handle(&self, message: &InboundMessage) -> Option<ComponentReply> {
        let command = detect_command(&message.text)?;
        let actor = message.sender_id.trim();

        if self.whitelist_only && !self.whitelist.contains(actor) {
            warn!(actor = %actor, "Rejected /ldg from non-whitelisted user");
            return Some(self.reply(ComponentReply::fail(PERMISSION_DENIED)).await);
        }

        let reply = match command {
            LdgCommand::Help => {
                self.send(&self.registry.help_text()).await;
                return Some(ComponentReply::ok("help displayed"));
            }
            LdgCommand::Unknown(problem) => {
                let text = format!("{problem}\n{}", self.registry.help_text());
                self.send(&text).await;
                return Some(ComponentReply::fail(problem.to_string()));
            }
            LdgCommand::DryRun { on } => {
                self.guard.session().write().await.set_dry_run(on);
                info!(actor = %actor, dry_run = on, "Session dry-run override set");
                ComponentReply::ok(format!(
                    "runtime dry_run={} (this process only)",
                    if on { "ON" } else { "OFF" }
                ))
            }
            LdgCommand::Action { kind, force } => {
                let context = message.context();
                let reason = format!("command:{}", message.text.trim());
                let result = self
                    .guard
                    .run(GuardInput {
                        kind,
                        actor_user_id: actor,
                        context: &context,
                        force,
                        reason: &reason,
                        source: ActionSource::Command,
                    })
                    .await;
                self.send(&result.report()).await;
                return Some(ComponentReply {
                    success: result.success(),
                    message: result.message,
                });
            }
        };
        Some(self.reply(reply).await)
    }

    async fn reply(&self, reply: ComponentReply) -> ComponentReply {
        self.send(&reply.message).await;
        reply
    }

    async fn send(&self, text: &str) {
        if let Err(e) = self.host.send_text(text).await {
            warn!(error = %e, "Failed to send reply");
        }
    }
}
