// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! drover-resource: declarative convergence of local host state.
//!
//! Each resource describes a piece of desired filesystem or process state;
//! its provider inspects what is actually on the host and performs the
//! minimal mutation to converge, reporting whether anything changed.
//! There is no rollback: a failure partway through a multi-step
//! reconciliation leaves the host partially converged, and re-running the
//! same resource later finishes the job.

mod directory;
mod error;
mod execute;
mod file;
mod owner;
mod probe;
mod service;
mod symlink;

pub use directory::DirectoryResource;
pub use error::ResourceError;
pub use execute::ExecuteResource;
pub use file::FileResource;
pub use owner::Ownership;
pub use probe::{probe, PathState};
pub use service::{ProcessRegistry, ServiceResource};
pub use symlink::SymlinkResource;
