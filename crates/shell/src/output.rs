// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured execution output.

/// Outcome of a command that ran to completion (successfully or not).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    /// Exit code; -1 when the process was terminated by a signal.
    pub exit_code: i32,
    /// Captured stdout, truncated to the snippet limit.
    pub stdout: String,
    /// Captured stderr, truncated to the snippet limit.
    pub stderr: String,
}

impl ExecOutput {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}
