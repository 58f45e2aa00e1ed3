// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! drover-wire: JSON protocol spoken with the controller.
//!
//! Two endpoints, both POST with JSON bodies:
//! `/agent/v1/register/{hostname}` and `/agent/v1/heartbeat/{hostname}`.
//! Actions and reports ride inside these envelopes with their field names
//! transmitted verbatim.

mod heartbeat;
mod register;

pub use heartbeat::{HeartbeatRequest, HeartbeatResponse};
pub use register::{RegistrationRequest, RegistrationResponse};

/// Path of the registration endpoint for a given hostname.
pub fn register_path(hostname: &str) -> String {
    format!("/agent/v1/register/{hostname}")
}

/// Path of the heartbeat endpoint for a given hostname.
pub fn heartbeat_path(hostname: &str) -> String {
    format!("/agent/v1/heartbeat/{hostname}")
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
