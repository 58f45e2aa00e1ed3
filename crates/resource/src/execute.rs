// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell command convergence with bounded retry.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use drover_shell::{ExecError, ExecOutput, Invocation};

use crate::{probe, PathState, ResourceError};

/// A shell command run as a convergence step.
///
/// Unlike the file-like resources, the side effects of a shell command
/// cannot be introspected, so any attempted execution counts as an update
/// even when the script itself happens to be idempotent.
#[derive(Debug, Clone)]
pub struct ExecuteResource {
    pub command: String,
    pub user: Option<String>,
    pub env: HashMap<String, String>,
    pub cwd: Option<PathBuf>,
    /// Skip execution entirely when this path already exists.
    pub creates: Option<PathBuf>,
    /// Attempts per convergence run.
    pub tries: u32,
    /// Sleep between attempts.
    pub try_sleep: Duration,
    pub timeout: Option<Duration>,
    pub updated: bool,
}

impl ExecuteResource {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            user: None,
            env: HashMap::new(),
            cwd: None,
            creates: None,
            tries: 1,
            try_sleep: Duration::ZERO,
            timeout: None,
            updated: false,
        }
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn creates(mut self, path: impl Into<PathBuf>) -> Self {
        self.creates = Some(path.into());
        self
    }

    pub fn tries(mut self, tries: u32, try_sleep: Duration) -> Self {
        self.tries = tries.max(1);
        self.try_sleep = try_sleep;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Run the command, retrying up to `tries` times with `try_sleep`
    /// between attempts. Only the last failure is surfaced; earlier ones
    /// are logged. Returns `None` when short-circuited by `creates`.
    pub async fn run(&mut self) -> Result<Option<ExecOutput>, ResourceError> {
        if let Some(creates) = &self.creates {
            if probe(creates) != PathState::Missing {
                tracing::debug!(
                    creates = %creates.display(),
                    "execute short-circuited, creates-path already present"
                );
                return Ok(None);
            }
        }

        self.updated = true;

        let mut last_err: Option<ExecError> = None;
        let mut last_output: Option<ExecOutput> = None;
        for attempt in 1..=self.tries {
            match drover_shell::run(&self.invocation()).await {
                Ok(output) if output.is_success() => return Ok(Some(output)),
                Ok(output) => {
                    tracing::warn!(
                        attempt,
                        tries = self.tries,
                        exit_code = output.exit_code,
                        "execute attempt failed"
                    );
                    last_output = Some(output);
                    last_err = None;
                }
                Err(err) => {
                    tracing::warn!(attempt, tries = self.tries, error = %err, "execute attempt errored");
                    last_err = Some(err);
                    last_output = None;
                }
            }
            if attempt < self.tries && !self.try_sleep.is_zero() {
                tokio::time::sleep(self.try_sleep).await;
            }
        }

        match (last_err, last_output) {
            (Some(err), _) => Err(err.into()),
            (None, Some(output)) => Ok(Some(output)),
            // tries >= 1, so one of the two is always set
            (None, None) => Ok(None),
        }
    }

    fn invocation(&self) -> Invocation {
        let mut inv = Invocation::sh(&self.command).envs(self.env.clone());
        if let Some(user) = &self.user {
            inv = inv.user(user.clone());
        }
        if let Some(cwd) = &self.cwd {
            inv = inv.cwd(cwd.clone());
        }
        if let Some(timeout) = self.timeout {
            inv = inv.timeout(timeout);
        }
        inv
    }
}

#[cfg(test)]
#[path = "execute_tests.rs"]
mod tests;
