// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File convergence.

use std::path::{Path, PathBuf};

use crate::{probe, Ownership, PathState, ResourceError};

/// Desired state of one regular file.
#[derive(Debug, Clone)]
pub struct FileResource {
    pub path: PathBuf,
    /// Desired content; `None` means "exists with any content".
    pub content: Option<String>,
    pub ownership: Ownership,
    /// Overwrite a present-but-different file.
    pub replace: bool,
    /// Keep the old content in `<path>.bak` before replacing it.
    pub backup: bool,
    /// Write-once marker: did convergence mutate the world.
    pub updated: bool,
}

impl FileResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            content: None,
            ownership: Ownership::default(),
            replace: true,
            backup: false,
            updated: false,
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn ownership(mut self, ownership: Ownership) -> Self {
        self.ownership = ownership;
        self
    }

    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    pub fn backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// Converge toward "file exists with this content/owner/mode".
    ///
    /// Content is written only when the file is absent, or present with
    /// different content and `replace` is set. Ownership and mode are
    /// reconciled separately even when content did not change.
    pub fn create(&mut self) -> Result<bool, ResourceError> {
        match probe(&self.path) {
            PathState::Directory => {
                return Err(ResourceError::TargetIsDirectory {
                    path: self.path.clone(),
                })
            }
            PathState::Missing => {
                self.require_parent()?;
                self.write_content()?;
            }
            PathState::File | PathState::Symlink => {
                if dangling_link(&self.path) {
                    // No content behind the link to compare or back up;
                    // swap the link for a regular file.
                    std::fs::remove_file(&self.path)
                        .map_err(|e| ResourceError::io("unlink", &self.path, e))?;
                    self.write_content()?;
                } else if self.content_differs()? {
                    if self.replace {
                        if self.backup {
                            self.backup_existing()?;
                        }
                        self.write_content()?;
                    } else {
                        tracing::debug!(
                            path = %self.path.display(),
                            "content differs but replace=false, leaving in place"
                        );
                    }
                }
            }
            PathState::Other => {
                return Err(ResourceError::UnexpectedOccupant {
                    path: self.path.clone(),
                    state: PathState::Other,
                })
            }
        }

        if self.ownership.reconcile(&self.path)? {
            self.updated = true;
        }
        Ok(self.updated)
    }

    /// Remove the file if present. Refuses directories.
    pub fn delete(&mut self) -> Result<bool, ResourceError> {
        match probe(&self.path) {
            PathState::Missing => Ok(self.updated),
            PathState::Directory => Err(ResourceError::TargetIsDirectory {
                path: self.path.clone(),
            }),
            _ => {
                std::fs::remove_file(&self.path)
                    .map_err(|e| ResourceError::io("remove", &self.path, e))?;
                self.updated = true;
                Ok(self.updated)
            }
        }
    }

    fn require_parent(&self) -> Result<(), ResourceError> {
        let parent = self.path.parent().unwrap_or(Path::new("/"));
        if probe(parent) != PathState::Directory {
            return Err(ResourceError::MissingParent {
                path: parent.to_path_buf(),
            });
        }
        Ok(())
    }

    fn content_differs(&self) -> Result<bool, ResourceError> {
        let Some(want) = &self.content else {
            return Ok(false);
        };
        let current = std::fs::read_to_string(&self.path)
            .map_err(|e| ResourceError::io("read", &self.path, e))?;
        Ok(&current != want)
    }

    fn write_content(&mut self) -> Result<(), ResourceError> {
        let content = self.content.as_deref().unwrap_or("");
        std::fs::write(&self.path, content)
            .map_err(|e| ResourceError::io("write", &self.path, e))?;
        tracing::info!(path = %self.path.display(), bytes = content.len(), "file written");
        self.updated = true;
        Ok(())
    }

    fn backup_existing(&self) -> Result<(), ResourceError> {
        let mut backup_path = self.path.clone().into_os_string();
        backup_path.push(".bak");
        std::fs::copy(&self.path, &backup_path)
            .map_err(|e| ResourceError::io("backup", &self.path, e))?;
        Ok(())
    }
}

/// A symlink whose target no longer exists.
fn dangling_link(path: &Path) -> bool {
    probe(path) == PathState::Symlink && std::fs::metadata(path).is_err()
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
