// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single point of truth for "what occupies this path".

use std::path::Path;

/// What a path currently holds, without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    Missing,
    File,
    Directory,
    Symlink,
    /// Device node, socket, fifo — anything the providers refuse to touch.
    Other,
}

drover_core::simple_display! {
    PathState {
        Missing => "missing",
        File => "file",
        Directory => "directory",
        Symlink => "symlink",
        Other => "other",
    }
}

/// Inspect a path. All providers go through this instead of ad-hoc
/// `exists`/`is_dir`/`is_symlink` call sequences.
pub fn probe(path: &Path) -> PathState {
    match std::fs::symlink_metadata(path) {
        Err(_) => PathState::Missing,
        Ok(meta) => {
            let ft = meta.file_type();
            if ft.is_symlink() {
                PathState::Symlink
            } else if ft.is_dir() {
                PathState::Directory
            } else if ft.is_file() {
                PathState::File
            } else {
                PathState::Other
            }
        }
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
