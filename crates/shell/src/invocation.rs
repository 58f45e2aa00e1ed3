// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Description of one command to run.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Either an argv vector (spawned directly) or a shell string
/// (run through `/bin/sh -c`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    Argv(Vec<String>),
    Shell(String),
}

impl CommandLine {
    /// The program name, for error messages and tracing.
    pub fn program(&self) -> &str {
        match self {
            CommandLine::Argv(argv) => argv.first().map(String::as_str).unwrap_or(""),
            CommandLine::Shell(s) => s,
        }
    }
}

/// One command with everything needed to run it.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub(crate) command: CommandLine,
    pub(crate) user: Option<String>,
    pub(crate) env: HashMap<String, String>,
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) timeout: Option<Duration>,
}

impl Invocation {
    /// Command from an argv vector.
    pub fn new(argv: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::from_command_line(CommandLine::Argv(argv.into_iter().map(Into::into).collect()))
    }

    /// Command from a shell string, run via `sh -c`.
    pub fn sh(script: impl Into<String>) -> Self {
        Self::from_command_line(CommandLine::Shell(script.into()))
    }

    fn from_command_line(command: CommandLine) -> Self {
        Self {
            command,
            user: None,
            env: HashMap::new(),
            cwd: None,
            timeout: None,
        }
    }

    /// Run as another user; privileges are dropped before exec.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Add one environment variable on top of the inherited environment.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Replace the inherited environment overlay wholesale.
    pub fn envs(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn command(&self) -> &CommandLine {
        &self.command
    }
}
