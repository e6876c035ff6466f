/// Debug-session state shared by the command and action components.
///
/// Holds only the `/ldg dryrun on|off` override. Lives for the process; it is
/// never reset by the plugin itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuardSession {
    dry_run_override: Option<bool>,
}

impl GuardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_dry_run(&mut self, on: bool) {
        self.dry_run_override = Some(on);
    }

    /// Session override when set, else the configured default.
    pub fn effective_dry_run(&self, default_dry_run: bool) -> bool {
        self.dry_run_override.unwrap_or(default_dry_run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_config_default() {
        let session = GuardSession::new();
        assert!(session.effective_dry_run(true));
        assert!(!session.effective_dry_run(false));
    }

    #[test]
    fn override_wins_either_way() {
        let mut session = GuardSession::new();
        session.set_dry_run(false);
        assert!(!session.effective_dry_run(true));
        session.set_dry_run(true);
        assert!(session.effective_dry_run(false));
    }
}
