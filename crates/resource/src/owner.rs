// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ownership and mode reconciliation shared by the file-like providers.

use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::Path;

use nix::unistd::{Gid, Uid};

use crate::ResourceError;

/// Desired owner/group/mode for a filesystem resource.
///
/// Owner and group accept either a numeric id or a symbolic name; a
/// symbolic name that does not resolve is a hard failure, never a silent
/// skip. Mode is octal text, e.g. `"0644"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ownership {
    pub owner: Option<String>,
    pub group: Option<String>,
    pub mode: Option<String>,
}

impl Ownership {
    pub fn is_empty(&self) -> bool {
        self.owner.is_none() && self.group.is_none() && self.mode.is_none()
    }

    /// Bring the path's owner, group, and mode in line with the desired
    /// state. Each of the three is reconciled independently; returns true
    /// if any chown/chmod was actually performed.
    pub fn reconcile(&self, path: &Path) -> Result<bool, ResourceError> {
        let mut updated = false;

        let meta = std::fs::metadata(path).map_err(|e| ResourceError::io("stat", path, e))?;

        let want_uid = self.owner.as_deref().map(coerce_uid).transpose()?;
        let want_gid = self.group.as_deref().map(coerce_gid).transpose()?;

        let uid_change = want_uid.filter(|uid| uid.as_raw() != meta.uid());
        let gid_change = want_gid.filter(|gid| gid.as_raw() != meta.gid());
        if uid_change.is_some() || gid_change.is_some() {
            nix::unistd::chown(path, uid_change, gid_change)
                .map_err(|e| ResourceError::io("chown", path, std::io::Error::from(e)))?;
            tracing::debug!(path = %path.display(), "ownership changed");
            updated = true;
        }

        if let Some(mode_text) = &self.mode {
            let want_mode = parse_mode(mode_text)?;
            if meta.permissions().mode() & 0o7777 != want_mode {
                std::fs::set_permissions(path, std::fs::Permissions::from_mode(want_mode))
                    .map_err(|e| ResourceError::io("chmod", path, e))?;
                tracing::debug!(path = %path.display(), mode = %mode_text, "mode changed");
                updated = true;
            }
        }

        Ok(updated)
    }
}

/// Resolve an owner spec to a uid: numeric text passes through, otherwise
/// a passwd lookup by name.
pub fn coerce_uid(spec: &str) -> Result<Uid, ResourceError> {
    if let Ok(raw) = spec.parse::<u32>() {
        return Ok(Uid::from_raw(raw));
    }
    nix::unistd::User::from_name(spec)
        .ok()
        .flatten()
        .map(|u| u.uid)
        .ok_or_else(|| ResourceError::UnknownUser { name: spec.to_string() })
}

/// Resolve a group spec to a gid, same rules as [`coerce_uid`].
pub fn coerce_gid(spec: &str) -> Result<Gid, ResourceError> {
    if let Ok(raw) = spec.parse::<u32>() {
        return Ok(Gid::from_raw(raw));
    }
    nix::unistd::Group::from_name(spec)
        .ok()
        .flatten()
        .map(|g| g.gid)
        .ok_or_else(|| ResourceError::UnknownGroup { name: spec.to_string() })
}

fn parse_mode(text: &str) -> Result<u32, ResourceError> {
    u32::from_str_radix(text, 8)
        .map_err(|_| ResourceError::InvalidMode { mode: text.to_string() })
        .and_then(|mode| {
            if mode > 0o7777 {
                Err(ResourceError::InvalidMode { mode: text.to_string() })
            } else {
                Ok(mode)
            }
        })
}

#[cfg(test)]
#[path = "owner_tests.rs"]
mod tests;
