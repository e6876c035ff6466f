//! Shared invocation path for both components: bind, gate, execute, log.

use std::sync::Arc;

use ldguard_config::GuardConfig;
use ldguard_core::{
    ActionKind, ActionRequest, ActionSource, ChatContext, GuardResult, GuardSession, Outcome,
};
use ldguard_executor::{ActionExecutor, NapcatApi};
use ldguard_logging::EventLogger;
use ldguard_security::{PolicyGate, SecurityPolicy};
use tokio::sync::RwLock;
use tracing::warn;

/// Debug-session state shared by the command (writer) and the service (reader).
pub type SharedSession = Arc<RwLock<GuardSession>>;

/// One request to run a guarded action.
#[derive(Debug, Clone)]
pub struct GuardInput<'a> {
    pub kind: ActionKind,
    pub actor_user_id: &'a str,
    pub context: &'a ChatContext,
    pub force: bool,
    pub reason: &'a str,
    pub source: ActionSource,
}

pub struct GuardService {
    default_dry_run: bool,
    gate: PolicyGate,
    executor: ActionExecutor,
    session: SharedSession,
}

impl GuardService {
    pub fn new(config: &GuardConfig, api: Arc<dyn NapcatApi>, session: SharedSession) -> Self {
        Self {
            default_dry_run: config.execution.default_dry_run,
            gate: PolicyGate::new(SecurityPolicy::from_config(config)),
            executor: ActionExecutor::new(api),
            session,
        }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Session override if one is set, otherwise the configured default.
    pub async fn effective_dry_run(&self) -> bool {
        self.session.read().await.effective_dry_run(self.default_dry_run)
    }

    pub async fn run(&self, input: GuardInput<'_>) -> GuardResult {
        let result = self.evaluate(input).await;
        EventLogger::log_result(&result);
        result
    }

    async fn evaluate(&self, input: GuardInput<'_>) -> GuardResult {
        let dry_run = self.effective_dry_run().await;
        let request =
            match ActionRequest::bind(input.kind, input.actor_user_id, input.context, input.source) {
                Ok(request) => request
                    .with_force(input.force)
                    .with_reason(input.reason)
                    .with_dry_run(dry_run),
                Err(e) => {
                    warn!(action = %input.kind, source = %input.source, error = %e, "Context check failed");
                    return GuardResult {
                        request_id: None,
                        outcome: Outcome::Rejected,
                        message: e.to_string(),
                        action: Some(input.kind),
                        target_id: None,
                        source: input.source,
                        response: None,
                    };
                }
            };

        match self.gate.evaluate(request) {
            Ok(cleared) => self.executor.execute(cleared).await,
            Err(denied) => GuardResult {
                request_id: Some(denied.request.id),
                outcome: Outcome::Denied,
                message: denied.reason.to_string(),
                action: Some(denied.request.kind),
                target_id: Some(denied.request.target().id().to_string()),
                source: denied.request.source,
                response: None,
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{FakeNapcat, config};
    use super::*;

    fn service(config: &GuardConfig) -> (GuardService, Arc<FakeNapcat>) {
        let api = Arc::new(FakeNapcat::default());
        let service = GuardService::new(config, api.clone(), SharedSession::default());
        (service, api)
    }

    fn input<'a>(kind: ActionKind, ctx: &'a ChatContext, reason: &'a str) -> GuardInput<'a> {
        GuardInput {
            kind,
            actor_user_id: "dev",
            context: ctx,
            force: false,
            reason,
            source: ActionSource::Planner,
        }
    }

    #[tokio::test]
    async fn context_mismatch_is_rejected_before_the_gate() {
        let (service, api) = service(&config(&["dev"]));
        let ctx = ChatContext::from_host(false, None, Some("777"));

        let result = service.run(input(ActionKind::Leave, &ctx, "long enough reason")).await;

        assert_eq!(result.outcome, Outcome::Rejected);
        assert!(!result.success());
        assert_eq!(result.target_id, None);
        assert!(api.endpoints().is_empty());
    }

    #[tokio::test]
    async fn cautious_short_reason_is_denied() {
        let mut cfg = config(&["dev"]);
        cfg.security.min_reason_length = 10;
        let (service, api) = service(&cfg);
        let ctx = ChatContext::from_host(true, Some("123"), Some("dev"));

        let denied = service.run(input(ActionKind::Leave, &ctx, "bye")).await;
        assert_eq!(denied.outcome, Outcome::Denied);
        assert_eq!(denied.target_id.as_deref(), Some("123"));
        assert!(api.endpoints().is_empty());

        let allowed = service.run(input(ActionKind::Leave, &ctx, "leaving for policy reasons")).await;
        assert_eq!(allowed.outcome, Outcome::Executed);
        assert_eq!(api.endpoints(), vec!["set_group_leave"]);
    }

    #[tokio::test]
    async fn config_default_dry_run_applies_without_override() {
        let mut cfg = config(&[]);
        cfg.execution.default_dry_run = true;
        let (service, api) = service(&cfg);
        let ctx = ChatContext::from_host(false, None, Some("777"));

        let result = service.run(input(ActionKind::Delete, &ctx, "spam bot account")).await;

        assert_eq!(result.outcome, Outcome::Simulated);
        assert!(api.endpoints().is_empty());
    }

    #[tokio::test]
    async fn session_override_beats_config_default() {
        let mut cfg = config(&[]);
        cfg.execution.default_dry_run = true;
        let (service, api) = service(&cfg);
        service.session().write().await.set_dry_run(false);
        let ctx = ChatContext::from_host(false, None, Some("777"));

        let result = service.run(input(ActionKind::Delete, &ctx, "spam bot account")).await;

        assert_eq!(result.outcome, Outcome::Executed);
        assert_eq!(api.endpoints(), vec!["delete_friend"]);
    }
}
