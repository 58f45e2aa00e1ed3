// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent tuning knobs, loaded from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Agent configuration.
///
/// Every field has a default so a missing or partial config file still
/// yields a working agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    /// Controller hostname.
    pub controller_host: String,
    /// Controller secured port.
    pub controller_port: u16,
    /// Hostname to register as; detected from the OS when empty.
    pub hostname: Option<String>,
    /// Maximum attempts per action before a failure report is emitted.
    pub max_retries: u32,
    /// Seconds slept between action attempts.
    pub sleep_between_retries: u64,
    /// Heartbeat interval when the action queue is idle, in seconds.
    pub heartbeat_idle_interval: u64,
    /// Heartbeat interval while actions are pending, in seconds.
    pub heartbeat_busy_interval: u64,
    /// Upper bound for the randomized reconnect delay, in seconds.
    pub connect_retry_range: u64,
    /// Seconds the worker sleeps when the queue is empty.
    pub queue_poll_interval: u64,
    /// Per-command timeout applied by handlers that run shell commands,
    /// in seconds. Zero disables the timeout.
    pub command_timeout: u64,
    /// Interpreter script for configuration artifacts that arrive without
    /// an explicit command.
    pub driver_script: Option<std::path::PathBuf>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            controller_host: "localhost".to_string(),
            controller_port: 8440,
            hostname: None,
            max_retries: 2,
            sleep_between_retries: 5,
            heartbeat_idle_interval: 10,
            heartbeat_busy_interval: 3,
            connect_retry_range: 120,
            queue_poll_interval: 1,
            command_timeout: 600,
            driver_script: None,
        }
    }
}

impl AgentConfig {
    /// Load configuration from a TOML file; missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
