// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key identifying one managed service process.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lookup key for the running-process registry.
///
/// A service process is addressed by the cluster it belongs to, the revision
/// of the cluster definition that started it, and its component/role pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessKey {
    pub cluster_id: String,
    pub cluster_definition_revision: i64,
    pub component: String,
    pub role: String,
}

impl ProcessKey {
    pub fn new(
        cluster_id: impl Into<String>,
        cluster_definition_revision: i64,
        component: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            cluster_id: cluster_id.into(),
            cluster_definition_revision,
            component: component.into(),
            role: role.into(),
        }
    }
}

impl fmt::Display for ProcessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.cluster_id, self.cluster_definition_revision, self.component, self.role
        )
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
