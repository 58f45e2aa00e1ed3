// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: state paths, single-instance lock, log setup.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use fs2::FileExt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("cannot determine state directory (set DROVER_STATE_DIR)")]
    NoStateDir,
    #[error("another agent holds the lock: {0}")]
    LockFailed(std::io::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Resolve state directory: DROVER_STATE_DIR > platform state dir + /drover
pub fn state_dir() -> Result<PathBuf, LifecycleError> {
    if let Ok(dir) = std::env::var("DROVER_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::state_dir()
        .map(|d| d.join("drover"))
        .ok_or(LifecycleError::NoStateDir)
}

/// Filesystem layout of a running agent.
#[derive(Debug, Clone)]
pub struct AgentPaths {
    /// Root state directory (e.g. ~/.local/state/drover)
    pub state_dir: PathBuf,
    /// Path to the TOML config file
    pub config_path: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to the agent log file
    pub log_path: PathBuf,
}

impl AgentPaths {
    /// Load paths for the user-level agent.
    ///
    /// `DROVER_CONFIG` overrides the config file location; everything else
    /// lives under the state directory.
    pub fn load() -> Result<Self, LifecycleError> {
        let state_dir = state_dir()?;
        let config_path = match std::env::var("DROVER_CONFIG") {
            Ok(path) => PathBuf::from(path),
            Err(_) => state_dir.join("agent.toml"),
        };

        Ok(Self {
            config_path,
            lock_path: state_dir.join("droverd.pid"),
            log_path: state_dir.join("droverd.log"),
            state_dir,
        })
    }

    /// Acquire the single-instance lock and record our PID in it.
    ///
    /// The returned handle must stay alive for the life of the process;
    /// dropping it releases the lock. Open without truncating so a failed
    /// acquisition cannot wipe the running agent's PID.
    pub fn acquire_lock(&self) -> Result<File, LifecycleError> {
        std::fs::create_dir_all(&self.state_dir)?;
        let mut lock_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)?;
        lock_file
            .try_lock_exclusive()
            .map_err(LifecycleError::LockFailed)?;

        lock_file.set_len(0)?;
        writeln!(lock_file, "{}", std::process::id())?;
        Ok(lock_file)
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
