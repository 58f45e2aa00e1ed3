// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! drover-shell: bounded external command execution.
//!
//! The leaf dependency of the agent: runs one external command with an
//! optional identity switch, environment, working directory, and timeout,
//! and returns the exit code plus captured output. A command that outlives
//! its timeout has its whole process group killed and surfaces as
//! [`ExecError::TimedOut`] — observably different from a non-zero exit,
//! because callers retry the two cases differently.

mod error;
mod invocation;
mod output;
mod run;

pub use error::ExecError;
pub use invocation::{CommandLine, Invocation};
pub use output::ExecOutput;
pub use run::run;
