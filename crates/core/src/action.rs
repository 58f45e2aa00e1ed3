// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Actions dispatched by the controller.
//!
//! An [`Action`] is one unit of work: immutable after creation, identified
//! by `id`, consumed exactly once by the action queue. The `kind` string is
//! transmitted verbatim on the wire; kinds this agent does not know fall
//! into [`ActionKind::Unknown`] and are reported as failures without retry.

use serde::{Deserialize, Serialize};

/// Closed set of action kinds understood by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    #[serde(rename = "START")]
    Start,
    #[serde(rename = "RUN", alias = "RUN_ACTION")]
    Run,
    #[serde(rename = "CREATE_STRUCTURE")]
    CreateStructure,
    #[serde(rename = "DELETE_STRUCTURE")]
    DeleteStructure,
    #[serde(rename = "WRITE_FILE")]
    WriteFile,
    #[serde(rename = "INSTALL_AND_CONFIG")]
    InstallAndConfig,
    #[serde(rename = "NO_OP")]
    NoOp,
    /// Fallback for kinds introduced by a newer controller.
    #[serde(other, rename = "UNKNOWN")]
    Unknown,
}

crate::simple_display! {
    ActionKind {
        Start => "START",
        Run => "RUN",
        CreateStructure => "CREATE_STRUCTURE",
        DeleteStructure => "DELETE_STRUCTURE",
        WriteFile => "WRITE_FILE",
        InstallAndConfig => "INSTALL_AND_CONFIG",
        NoOp => "NO_OP",
        Unknown => "UNKNOWN",
    }
}

/// One unit of work sent by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: i64,
    pub kind: ActionKind,
    #[serde(default)]
    pub cluster_id: String,
    #[serde(default)]
    pub cluster_definition_revision: i64,
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub role: String,
    /// Command line for START / RUN / INSTALL_AND_CONFIG.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Identity the command runs under; the invoking user when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Run between failed attempts of a RUN action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_up_command: Option<String>,
    /// Target path for WRITE_FILE / CREATE_STRUCTURE / DELETE_STRUCTURE
    /// and the artifact location for INSTALL_AND_CONFIG.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// File content for WRITE_FILE / INSTALL_AND_CONFIG.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Desired owner for filesystem actions (name or numeric id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Desired group for filesystem actions (name or numeric id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Desired octal mode for filesystem actions, e.g. "0644".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
}

impl Action {
    /// Key of the service process this action addresses.
    pub fn process_key(&self) -> crate::ProcessKey {
        crate::ProcessKey {
            cluster_id: self.cluster_id.clone(),
            cluster_definition_revision: self.cluster_definition_revision,
            component: self.component.clone(),
            role: self.role.clone(),
        }
    }
}

crate::builder! {
    pub struct ActionBuilder => Action {
        into {
            cluster_id: String = "test-cluster",
            component: String = "component",
            role: String = "role",
        }
        set {
            id: i64 = 1,
            kind: ActionKind = ActionKind::NoOp,
            cluster_definition_revision: i64 = 1,
        }
        option {
            command: String = None,
            user: String = None,
            clean_up_command: String = None,
            path: String = None,
            content: String = None,
            owner: String = None,
            group: String = None,
            permission: String = None,
        }
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
