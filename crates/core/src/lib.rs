// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! drover-core: Shared domain types for the Drover host agent.
//!
//! Everything the other crates agree on lives here: the [`Action`] model
//! dispatched by the controller, the terminal [`CommandReport`] sent back,
//! the [`ProcessKey`] identifying a managed service process, and the agent
//! tuning knobs in [`config`].

pub mod macros;

pub mod action;
pub mod config;
pub mod process;
pub mod report;

pub use action::{Action, ActionKind};
pub use config::{AgentConfig, ConfigError};
pub use process::ProcessKey;
pub use report::CommandReport;

#[cfg(any(test, feature = "test-support"))]
pub use action::ActionBuilder;
