// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory convergence.

use std::path::{Path, PathBuf};

use crate::{probe, Ownership, PathState, ResourceError};

/// Desired state of one directory (optionally a whole tree).
#[derive(Debug, Clone)]
pub struct DirectoryResource {
    pub path: PathBuf,
    pub ownership: Ownership,
    /// Create missing ancestors too; without it the parent must pre-exist.
    pub recursive: bool,
    pub updated: bool,
}

impl DirectoryResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ownership: Ownership::default(),
            recursive: false,
            updated: false,
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn ownership(mut self, ownership: Ownership) -> Self {
        self.ownership = ownership;
        self
    }

    /// Converge toward "directory exists with this owner/mode".
    pub fn create(&mut self) -> Result<bool, ResourceError> {
        match probe(&self.path) {
            PathState::Directory => {}
            PathState::Missing => {
                if self.recursive {
                    std::fs::create_dir_all(&self.path)
                        .map_err(|e| ResourceError::io("mkdir -p", &self.path, e))?;
                } else {
                    let parent = self.path.parent().unwrap_or(Path::new("/"));
                    if probe(parent) != PathState::Directory {
                        return Err(ResourceError::MissingParent {
                            path: parent.to_path_buf(),
                        });
                    }
                    std::fs::create_dir(&self.path)
                        .map_err(|e| ResourceError::io("mkdir", &self.path, e))?;
                }
                tracing::info!(path = %self.path.display(), "directory created");
                self.updated = true;
            }
            _ => {
                return Err(ResourceError::NotADirectory {
                    path: self.path.clone(),
                })
            }
        }

        if self.ownership.reconcile(&self.path)? {
            self.updated = true;
        }
        Ok(self.updated)
    }

    /// Remove the directory tree if present.
    pub fn delete(&mut self) -> Result<bool, ResourceError> {
        match probe(&self.path) {
            PathState::Missing => Ok(self.updated),
            PathState::Directory => {
                std::fs::remove_dir_all(&self.path)
                    .map_err(|e| ResourceError::io("rmdir", &self.path, e))?;
                tracing::info!(path = %self.path.display(), "directory removed");
                self.updated = true;
                Ok(self.updated)
            }
            _ => Err(ResourceError::NotADirectory {
                path: self.path.clone(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
