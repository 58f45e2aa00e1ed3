// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal outcome of one action.

use crate::ActionKind;
use serde::{Deserialize, Serialize};

/// Produced once per [`Action`](crate::Action) after it reaches a terminal
/// retry state, folded into the next heartbeat, then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandReport {
    pub id: i64,
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_definition_revision: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub exit_code: i32,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    /// Number of attempts made before this report became terminal.
    pub retry_action_count: u32,
}

impl CommandReport {
    /// Skeleton report for an action; exit code and output filled in by the
    /// worker once the action reaches a terminal state.
    pub fn for_action(action: &crate::Action) -> Self {
        Self {
            id: action.id,
            kind: action.kind,
            cluster_id: Some(action.cluster_id.clone()),
            cluster_definition_revision: Some(action.cluster_definition_revision),
            component: Some(action.component.clone()),
            role: Some(action.role.clone()),
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
            retry_action_count: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
