// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler failure conditions.

use drover_resource::ResourceError;
use drover_shell::ExecError;

/// Why a handler attempt failed.
///
/// Every variant is treated like a non-zero exit for retry purposes; the
/// text ends up in the report's stderr.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("action {id} ({kind}) is missing required field `{field}`")]
    MissingField {
        id: i64,
        kind: drover_core::ActionKind,
        field: &'static str,
    },

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Exec(#[from] ExecError),
}

impl EngineError {
    /// Exit code recorded when this error terminates an attempt.
    ///
    /// Timeouts get the conventional 124 so they stay observably different
    /// from application failures in the report.
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::Exec(ExecError::TimedOut { .. })
            | EngineError::Resource(ResourceError::Exec(ExecError::TimedOut { .. })) => 124,
            _ => 1,
        }
    }
}
