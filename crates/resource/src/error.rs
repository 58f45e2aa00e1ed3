// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Convergence failure conditions.

use std::path::PathBuf;

/// A provider precondition was violated or a mutation failed.
///
/// These surface as failed action reports with descriptive text; the queue
/// retries the whole action, and convergence picks up where it left off.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("target of file resource is a directory: {path}")]
    TargetIsDirectory { path: PathBuf },

    #[error("parent directory does not exist: {path}")]
    MissingParent { path: PathBuf },

    #[error("path is occupied by a non-directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("path is occupied by a non-symlink: {path}")]
    NotASymlink { path: PathBuf },

    #[error("path is occupied by a {state}, refusing to touch it: {path}")]
    UnexpectedOccupant { path: PathBuf, state: crate::PathState },

    #[error("hard link target {path}: {reason}")]
    InvalidHardLinkTarget { path: PathBuf, reason: String },

    #[error("user does not exist: {name}")]
    UnknownUser { name: String },

    #[error("group does not exist: {name}")]
    UnknownGroup { name: String },

    #[error("invalid mode `{mode}`: expected octal digits")]
    InvalidMode { mode: String },

    #[error("service {key} is not running")]
    ServiceNotRunning { key: String },

    #[error("service {key} is already running (pid {pid})")]
    ServiceAlreadyRunning { key: String, pid: u32 },

    #[error("{op} failed for {path}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Exec(#[from] drover_shell::ExecError),
}

impl ResourceError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}
