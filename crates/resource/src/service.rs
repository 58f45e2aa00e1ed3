// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Managed service processes and the running-process registry.

use std::collections::HashMap;
use std::process::Stdio;
use std::time::Duration;

use nix::sys::signal::{kill, killpg, Signal};
use nix::unistd::Pid;
use parking_lot::Mutex;

use drover_core::ProcessKey;

use crate::ResourceError;

/// How long stop() waits for SIGTERM to land before escalating to SIGKILL.
const STOP_GRACE: Duration = Duration::from_secs(5);
const STOP_POLL: Duration = Duration::from_millis(100);

/// Live view of the service processes this agent has started.
///
/// Entries are validated against the OS process table on every query and
/// dead ones are pruned; nothing is persisted across agent restarts.
#[derive(Debug, Default)]
pub struct ProcessRegistry {
    inner: Mutex<HashMap<ProcessKey, u32>>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys of all currently live service processes.
    pub fn running(&self) -> Vec<ProcessKey> {
        let mut inner = self.inner.lock();
        inner.retain(|_, pid| is_alive(*pid));
        inner.keys().cloned().collect()
    }

    /// Pid of a live service process, if any.
    pub fn pid_of(&self, key: &ProcessKey) -> Option<u32> {
        let mut inner = self.inner.lock();
        match inner.get(key).copied() {
            Some(pid) if is_alive(pid) => Some(pid),
            Some(_) => {
                inner.remove(key);
                None
            }
            None => None,
        }
    }

    fn record(&self, key: ProcessKey, pid: u32) {
        self.inner.lock().insert(key, pid);
    }

    fn remove(&self, key: &ProcessKey) {
        self.inner.lock().remove(key);
    }
}

fn is_alive(pid: u32) -> bool {
    kill(Pid::from_raw(pid as i32), None).is_ok()
}

/// Desired state of one long-running service process.
#[derive(Debug, Clone)]
pub struct ServiceResource {
    pub key: ProcessKey,
    /// Command that launches the service, run through `sh -c`.
    pub command: String,
    pub user: Option<String>,
    pub updated: bool,
}

impl ServiceResource {
    pub fn new(key: ProcessKey, command: impl Into<String>) -> Self {
        Self {
            key,
            command: command.into(),
            user: None,
            updated: false,
        }
    }

    pub fn user(mut self, user: Option<String>) -> Self {
        self.user = user;
        self
    }

    /// Converge toward "service is running". Already-running is a no-op.
    pub fn start(&mut self, registry: &ProcessRegistry) -> Result<bool, ResourceError> {
        if registry.pid_of(&self.key).is_some() {
            return Ok(self.updated);
        }

        let mut process = tokio::process::Command::new("/bin/sh");
        process.arg("-c").arg(&self.command);
        process.process_group(0);
        process.stdin(Stdio::null());
        process.stdout(Stdio::null());
        process.stderr(Stdio::null());

        if let Some(user) = &self.user {
            let resolved = nix::unistd::User::from_name(user)
                .ok()
                .flatten()
                .ok_or_else(|| ResourceError::UnknownUser { name: user.clone() })?;
            process.uid(resolved.uid.as_raw());
            process.gid(resolved.gid.as_raw());
        }

        let child = process
            .spawn()
            .map_err(|source| ResourceError::io("spawn", &self.command, source))?;
        let Some(pid) = child.id() else {
            return Err(ResourceError::ServiceNotRunning {
                key: self.key.to_string(),
            });
        };
        // The Child handle is dropped; the runtime reaps it when it exits.
        registry.record(self.key.clone(), pid);
        tracing::info!(key = %self.key, pid, "service started");
        self.updated = true;
        Ok(self.updated)
    }

    /// Converge toward "service is not running". SIGTERM to the process
    /// group, escalating to SIGKILL after a grace period.
    pub async fn stop(key: &ProcessKey, registry: &ProcessRegistry) -> Result<bool, ResourceError> {
        let Some(pid) = registry.pid_of(key) else {
            return Ok(false);
        };

        let pgid = Pid::from_raw(pid as i32);
        let _ = killpg(pgid, Signal::SIGTERM);

        let deadline = tokio::time::Instant::now() + STOP_GRACE;
        while is_alive(pid) {
            if tokio::time::Instant::now() >= deadline {
                tracing::warn!(key = %key, pid, "SIGTERM grace expired, sending SIGKILL");
                let _ = killpg(pgid, Signal::SIGKILL);
                break;
            }
            tokio::time::sleep(STOP_POLL).await;
        }
        // Wait out the SIGKILL if it was needed; bounded, since reaping of
        // the zombie happens asynchronously in the runtime.
        let kill_deadline = tokio::time::Instant::now() + STOP_GRACE;
        while is_alive(pid) && tokio::time::Instant::now() < kill_deadline {
            tokio::time::sleep(STOP_POLL).await;
        }

        registry.remove(key);
        tracing::info!(key = %key, pid, "service stopped");
        Ok(true)
    }

    /// Is the service process currently alive?
    pub fn status(key: &ProcessKey, registry: &ProcessRegistry) -> bool {
        registry.pid_of(key).is_some()
    }

    /// Stop-then-start.
    pub async fn restart(&mut self, registry: &ProcessRegistry) -> Result<bool, ResourceError> {
        Self::stop(&self.key, registry).await?;
        self.start(registry)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
