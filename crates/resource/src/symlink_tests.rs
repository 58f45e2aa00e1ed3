// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn creates_symlink() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("t");
    std::fs::write(&target, "x").unwrap();
    let link = dir.path().join("l");

    let mut resource = SymlinkResource::new(&link, &target);
    assert!(resource.create().unwrap());
    assert_eq!(std::fs::read_link(&link).unwrap(), target);
}

#[test]
fn correct_existing_link_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("t");
    std::fs::write(&target, "x").unwrap();
    let link = dir.path().join("l");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let mut resource = SymlinkResource::new(&link, &target);
    assert!(!resource.create().unwrap());
    assert!(!resource.updated);
}

#[test]
fn wrong_target_gets_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old");
    let new = dir.path().join("new");
    std::fs::write(&old, "x").unwrap();
    std::fs::write(&new, "y").unwrap();
    let link = dir.path().join("l");
    std::os::unix::fs::symlink(&old, &link).unwrap();

    let mut resource = SymlinkResource::new(&link, &new);
    assert!(resource.create().unwrap());
    assert_eq!(std::fs::read_link(&link).unwrap(), new);
}

#[test]
fn non_symlink_occupant_fails() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("t");
    std::fs::write(&target, "x").unwrap();
    let link = dir.path().join("l");
    std::fs::write(&link, "plain file").unwrap();

    let mut resource = SymlinkResource::new(&link, &target);
    assert!(matches!(
        resource.create(),
        Err(ResourceError::NotASymlink { .. })
    ));
}

#[test]
fn hard_link_requires_existing_target() {
    let dir = tempfile::tempdir().unwrap();
    let mut resource =
        SymlinkResource::new(dir.path().join("l"), dir.path().join("absent")).hard(true);
    assert!(matches!(
        resource.create(),
        Err(ResourceError::InvalidHardLinkTarget { .. })
    ));
}

#[test]
fn hard_link_refuses_directory_target() {
    let dir = tempfile::tempdir().unwrap();
    let mut resource = SymlinkResource::new(dir.path().join("l"), dir.path()).hard(true);
    assert!(matches!(
        resource.create(),
        Err(ResourceError::InvalidHardLinkTarget { .. })
    ));
}

#[test]
fn hard_link_created_and_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("t");
    std::fs::write(&target, "x").unwrap();
    let link = dir.path().join("l");

    let mut resource = SymlinkResource::new(&link, &target).hard(true);
    assert!(resource.create().unwrap());
    assert_eq!(std::fs::read_to_string(&link).unwrap(), "x");

    let mut again = SymlinkResource::new(&link, &target).hard(true);
    assert!(!again.create().unwrap());
}

#[test]
fn delete_removes_link_but_not_target() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("t");
    std::fs::write(&target, "x").unwrap();
    let link = dir.path().join("l");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    assert!(SymlinkResource::new(&link, &target).delete().unwrap());
    assert_eq!(probe(&link), PathState::Missing);
    assert_eq!(probe(&target), PathState::File);
}
