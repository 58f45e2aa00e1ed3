// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Heartbeat envelope.

use drover_core::{Action, CommandReport};
use serde::{Deserialize, Deserializer, Serialize};

/// One heartbeat: the last accepted sequence number, any reports that
/// became terminal since the previous heartbeat, and the queue idle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatRequest {
    pub response_id: i64,
    /// Milliseconds since the epoch at the time the payload was built.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reports: Vec<CommandReport>,
    pub idle: bool,
    /// Id of the most recently applied configuration artifact, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_config: Option<i64>,
}

/// Controller's answer to a heartbeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatResponse {
    pub response_id: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub execution_commands: Vec<Action>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status_commands: Vec<Action>,
    /// Transmitted as the strings "true"/"false" by older controllers,
    /// as a bare bool by newer ones; accept both.
    #[serde(default, deserialize_with = "bool_lenient")]
    pub restart_agent: bool,
    /// Presence (any value) sends the agent back to registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_command: Option<serde_json::Value>,
}

fn bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Text(String),
    }

    Ok(match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => b,
        BoolOrString::Text(s) => s.eq_ignore_ascii_case("true"),
    })
}
