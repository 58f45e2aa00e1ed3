// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! drover-agent: the long-running host daemon.
//!
//! Holds the registration/heartbeat session with the controller, feeds
//! received command batches into the action queue, and ships terminal
//! reports back on the next heartbeat.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod controller;
pub mod lifecycle;
pub mod transport;

pub use controller::{AgentState, HeartbeatController, SessionOutcome, AGENT_RESTART_EXIT_CODE};
pub use lifecycle::{AgentPaths, LifecycleError};
pub use transport::{ControllerClient, HttpController, TransportError};
