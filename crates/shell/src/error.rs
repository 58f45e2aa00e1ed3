// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution error types.

use std::time::Duration;

/// Errors that can occur while running an external command.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The executable does not exist (distinct from a non-zero exit).
    #[error("command not found: {command}")]
    NotFound { command: String },

    /// The command could not be spawned for a reason other than NotFound.
    #[error("failed to spawn `{command}`: {source}")]
    SpawnFailed {
        command: String,
        source: std::io::Error,
    },

    /// The requested run-as user does not exist on this host.
    #[error("user does not exist: {user}")]
    UnknownUser { user: String },

    /// Dropping privileges to the requested user was refused.
    #[error("permission denied switching to user {user}")]
    PermissionDenied { user: String },

    /// The command exceeded its timeout; the process group was killed.
    /// Carries whatever output was captured before the kill.
    #[error("command `{command}` timed out after {timeout:?}")]
    TimedOut {
        command: String,
        timeout: Duration,
        stdout: String,
        stderr: String,
    },

    /// I/O failure while capturing output or reaping the child.
    #[error("i/o failure while running `{command}`: {source}")]
    Io {
        command: String,
        source: std::io::Error,
    },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
