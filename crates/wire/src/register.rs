// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registration envelope.

use drover_core::Action;
use serde::{Deserialize, Serialize};

/// Host facts sent when the agent (re)registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub hostname: String,
    pub agent_version: String,
    /// Milliseconds since the epoch at the time the payload was built.
    pub timestamp: i64,
    /// responseId of a previous session, when re-registering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_response_id: Option<i64>,
}

/// Controller's answer to a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub response_id: i64,
    /// Commands to execute immediately after registering.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status_commands: Vec<Action>,
}
