//! Plugin lifecycle: build components from a loaded config, expose them to the host.

use std::sync::Arc;

use anyhow::{Context, Result};
use ldguard_config::{COMMAND_PREFIX, GuardConfig};
use ldguard_executor::{HttpNapcat, NapcatApi};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::action::LeaveDeleteGuardAction;
use crate::command::LeaveDeleteGuardCommand;
use crate::guard::{GuardService, SharedSession};
use crate::sdk::{ComponentInfo, HostBridge};

pub const PLUGIN_NAME: &str = "leave_delete_guard_plugin";

/// Current state of the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginState {
    /// `plugin.enabled = false`; nothing is registered.
    Disabled,
    Active,
    Unloaded,
}

pub struct LeaveDeleteGuardPlugin {
    config: Arc<GuardConfig>,
    action: Option<LeaveDeleteGuardAction>,
    command: Option<LeaveDeleteGuardCommand>,
    state: PluginState,
}

impl LeaveDeleteGuardPlugin {
    /// Wire the plugin with an explicit NapCat client.
    pub fn new(config: GuardConfig, api: Arc<dyn NapcatApi>, host: Arc<dyn HostBridge>) -> Self {
        if !config.plugin.enabled {
            info!(plugin = PLUGIN_NAME, "Plugin disabled by config; no components registered");
            return Self {
                config: Arc::new(config),
                action: None,
                command: None,
                state: PluginState::Disabled,
            };
        }
        if config.command.prefix.trim() != COMMAND_PREFIX {
            warn!(
                configured = %config.command.prefix,
                "command.prefix is fixed to {COMMAND_PREFIX}; configured value ignored"
            );
        }

        let session = SharedSession::default();
        let guard = Arc::new(GuardService::new(&config, api, session));
        let action = LeaveDeleteGuardAction::new(guard.clone(), host.clone());
        let command = LeaveDeleteGuardCommand::new(&config, guard, host);
        info!(
            plugin = PLUGIN_NAME,
            version = %config.plugin.config_version,
            mode = %config.security_mode().as_str(),
            dry_run = config.execution.default_dry_run,
            "Plugin loaded"
        );
        Self {
            config: Arc::new(config),
            action: Some(action),
            command: Some(command),
            state: PluginState::Active,
        }
    }

    /// Wire the plugin with the HTTP NapCat client described by `config`.
    pub fn from_config(config: GuardConfig, host: Arc<dyn HostBridge>) -> Result<Self> {
        let api = HttpNapcat::from_config(&config).context("Failed to build NapCat client")?;
        debug!(base_url = %api.base_url(), "NapCat client ready");
        Ok(Self::new(config, Arc::new(api), host))
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn state(&self) -> PluginState {
        self.state
    }

    /// Components to register with the host. Empty unless active.
    pub fn components(&self) -> Vec<ComponentInfo> {
        if self.state != PluginState::Active {
            return Vec::new();
        }
        vec![LeaveDeleteGuardAction::info(), LeaveDeleteGuardCommand::info()]
    }

    pub fn action(&self) -> Option<&LeaveDeleteGuardAction> {
        self.action.as_ref()
    }

    pub fn command(&self) -> Option<&LeaveDeleteGuardCommand> {
        self.command.as_ref()
    }

    /// Drop the components. The session override goes with them.
    pub fn unload(&mut self) {
        if self.state == PluginState::Unloaded {
            return;
        }
        self.action = None;
        self.command = None;
        self.state = PluginState::Unloaded;
        info!(plugin = PLUGIN_NAME, "Plugin unloaded");
    }
}
