//! Interactive console host: feeds stdin lines to the plugin as if they came
//! from a chat, and prints what the plugin sends back.

use std::io::Write;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use ldguard_core::GuardError;
use ldguard_plugin::{
    ActionInvocation, ActionRecord, HostBridge, InboundMessage, LeaveDeleteGuardAction,
    LeaveDeleteGuardPlugin,
};
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::terminal_output::{note, Tone};

/// Who is "typing" into the console and where.
#[derive(Debug, Clone)]
pub struct ConsoleIdentity {
    pub user_id: String,
    /// Group chat when set, private chat with `user_id` otherwise.
    pub group_id: Option<String>,
}

/// `HostBridge` that writes replies to a terminal.
pub struct ConsoleHost {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleHost {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    fn write_line(&self, line: &str) -> Result<(), GuardError> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| GuardError::HostError("console output lock poisoned".into()))?;
        writeln!(out, "{line}")
            .and_then(|_| out.flush())
            .map_err(|e| GuardError::HostError(e.to_string()))
    }
}

#[async_trait]
impl HostBridge for ConsoleHost {
    async fn send_text(&self, text: &str) -> Result<(), GuardError> {
        self.write_line(&format!("[reply] {}", text.replace('\n', "\n        ")))
    }

    async fn store_action_info(&self, record: ActionRecord) -> Result<(), GuardError> {
        self.write_line(&format!(
            "[action_info] {} done={} {}",
            record.action_name, record.done, record.prompt_display
        ))
    }
}

/// What one console line turned into.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Skip,
    Quit,
    Prompt,
    Plan(String),
    Chat(String),
}

fn classify(raw: &str) -> Line {
    let line = raw.trim();
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(head, rest)| (head, rest.trim()));
    match (head, rest) {
        ("", _) => Line::Skip,
        ("quit" | "exit", _) => Line::Quit,
        ("prompt", _) => Line::Prompt,
        ("plan", reason) => Line::Plan(reason.to_string()),
        _ => Line::Chat(line.to_string()),
    }
}

/// Run the console loop until EOF or `quit`. Returns the number of lines the
/// plugin handled.
pub async fn run<R>(
    plugin: &LeaveDeleteGuardPlugin,
    identity: &ConsoleIdentity,
    input: R,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let (Some(action), Some(command)) = (plugin.action(), plugin.command()) else {
        note(Tone::Warn, "Plugin is disabled (plugin.enabled = false); nothing to do");
        return Ok(0);
    };

    let is_group = identity.group_id.is_some();
    let mut handled = 0;
    let mut lines = input.lines();
    while let Some(raw) = lines.next_line().await? {
        match classify(&raw) {
            Line::Skip => {}
            Line::Quit => break,
            Line::Prompt => println!("{}", LeaveDeleteGuardAction::planner_prompt()),
            Line::Plan(reason) => {
                let invocation = ActionInvocation {
                    user_id: identity.user_id.clone(),
                    is_group,
                    group_id: identity.group_id.clone(),
                    action_data: json!({ "reason": reason }),
                    reasoning: String::new(),
                };
                let reply = action.execute(&invocation).await;
                note(if reply.success { Tone::Success } else { Tone::Warn }, &reply.message);
                handled += 1;
            }
            Line::Chat(text) => {
                let message = InboundMessage {
                    text,
                    sender_id: identity.user_id.clone(),
                    is_group,
                    group_id: identity.group_id.clone(),
                };
                if command.handle(&message).await.is_some() {
                    handled += 1;
                } else {
                    note(Tone::Info, "Not an /ldg command; use `plan <reason>` for the planner action");
                }
            }
        }
    }
    Ok(handled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ldguard_config::GuardConfig;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn plugin(config: GuardConfig) -> (LeaveDeleteGuardPlugin, SharedBuf) {
        let buf = SharedBuf::default();
        let host = Arc::new(ConsoleHost::new(Box::new(buf.clone())));
        (LeaveDeleteGuardPlugin::from_config(config, host).unwrap(), buf)
    }

    fn dry_run_config() -> GuardConfig {
        let mut config = GuardConfig::default();
        config.security.developer_whitelist = vec!["42".into()];
        config.execution.default_dry_run = true;
        config
    }

    #[test]
    fn classifies_lines() {
        assert_eq!(classify("   "), Line::Skip);
        assert_eq!(classify("exit"), Line::Quit);
        assert_eq!(classify("prompt"), Line::Prompt);
        assert_eq!(classify("plan  spam bot account "), Line::Plan("spam bot account".into()));
        assert_eq!(classify("plan"), Line::Plan(String::new()));
        assert_eq!(classify(" /ldg help "), Line::Chat("/ldg help".into()));
    }

    #[tokio::test]
    async fn commands_and_plans_reach_the_plugin() {
        let (plugin, buf) = plugin(dry_run_config());
        let identity = ConsoleIdentity { user_id: "42".into(), group_id: Some("123".into()) };
        let input: &[u8] = b"/ldg leave\nhello\nplan repeated threats in chat\nquit\n/ldg help\n";

        let handled = run(&plugin, &identity, input).await.unwrap();

        assert_eq!(handled, 2);
        let out = buf.text();
        assert!(out.contains("[reply] [ldg] success=true"));
        assert!(out.contains("target=123"));
        assert!(out.contains("[action_info] leave_delete_guard_action done=true"));
        assert!(!out.contains("debug commands"));
    }

    #[tokio::test]
    async fn disabled_plugin_handles_nothing() {
        let mut config = dry_run_config();
        config.plugin.enabled = false;
        let (plugin, buf) = plugin(config);
        let identity = ConsoleIdentity { user_id: "42".into(), group_id: None };

        let handled = run(&plugin, &identity, &b"/ldg help\n"[..]).await.unwrap();

        assert_eq!(handled, 0);
        assert!(buf.text().is_empty());
    }
}
