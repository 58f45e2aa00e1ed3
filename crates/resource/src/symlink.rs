// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Symbolic and hard link convergence.

use std::path::PathBuf;

use crate::{probe, PathState, ResourceError};

/// Desired state of one link.
///
/// Links carry no owner/group/mode of their own: `chown` through a
/// symlink lands on the target, and link modes are ignored on Linux.
/// Ownership is reconciled by the target's [`FileResource`](crate::FileResource)
/// or [`DirectoryResource`](crate::DirectoryResource), never here.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    pub path: PathBuf,
    /// Link target.
    pub to: PathBuf,
    /// Hard link instead of symbolic. Hard links require the target to
    /// exist and not be a directory.
    pub hard: bool,
    pub updated: bool,
}

impl SymlinkResource {
    pub fn new(path: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            to: to.into(),
            hard: false,
            updated: false,
        }
    }

    pub fn hard(mut self, hard: bool) -> Self {
        self.hard = hard;
        self
    }

    /// Converge toward "link exists pointing at `to`".
    ///
    /// A link already pointing at the target is a no-op; a link pointing
    /// elsewhere is replaced; anything that is not a link fails.
    pub fn create(&mut self) -> Result<bool, ResourceError> {
        if self.hard {
            return self.create_hard();
        }

        match probe(&self.path) {
            PathState::Symlink => {
                let current = std::fs::read_link(&self.path)
                    .map_err(|e| ResourceError::io("readlink", &self.path, e))?;
                if current == self.to {
                    return Ok(self.updated);
                }
                std::fs::remove_file(&self.path)
                    .map_err(|e| ResourceError::io("unlink", &self.path, e))?;
                self.link()?;
            }
            PathState::Missing => self.link()?,
            _ => {
                return Err(ResourceError::NotASymlink {
                    path: self.path.clone(),
                })
            }
        }
        Ok(self.updated)
    }

    /// Remove the link if present; refuses anything that is not a link.
    pub fn delete(&mut self) -> Result<bool, ResourceError> {
        match probe(&self.path) {
            PathState::Missing => Ok(self.updated),
            PathState::Symlink | PathState::File if self.hard => {
                std::fs::remove_file(&self.path)
                    .map_err(|e| ResourceError::io("unlink", &self.path, e))?;
                self.updated = true;
                Ok(self.updated)
            }
            PathState::Symlink => {
                std::fs::remove_file(&self.path)
                    .map_err(|e| ResourceError::io("unlink", &self.path, e))?;
                self.updated = true;
                Ok(self.updated)
            }
            _ => Err(ResourceError::NotASymlink {
                path: self.path.clone(),
            }),
        }
    }

    fn create_hard(&mut self) -> Result<bool, ResourceError> {
        match probe(&self.to) {
            PathState::Missing => {
                return Err(ResourceError::InvalidHardLinkTarget {
                    path: self.to.clone(),
                    reason: "does not exist".to_string(),
                })
            }
            PathState::Directory => {
                return Err(ResourceError::InvalidHardLinkTarget {
                    path: self.to.clone(),
                    reason: "is a directory".to_string(),
                })
            }
            _ => {}
        }

        match probe(&self.path) {
            PathState::Missing => {
                std::fs::hard_link(&self.to, &self.path)
                    .map_err(|e| ResourceError::io("link", &self.path, e))?;
                tracing::info!(
                    path = %self.path.display(),
                    to = %self.to.display(),
                    "hard link created"
                );
                self.updated = true;
                Ok(self.updated)
            }
            PathState::File => Ok(self.updated),
            _ => Err(ResourceError::NotASymlink {
                path: self.path.clone(),
            }),
        }
    }

    fn link(&mut self) -> Result<(), ResourceError> {
        std::os::unix::fs::symlink(&self.to, &self.path)
            .map_err(|e| ResourceError::io("symlink", &self.path, e))?;
        tracing::info!(
            path = %self.path.display(),
            to = %self.to.display(),
            "symlink created"
        );
        self.updated = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "symlink_tests.rs"]
mod tests;
