// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Convergence semantics across repeated batches.

use crate::prelude::*;

fn write_action(id: i64, path: &std::path::Path, content: &str) -> Action {
    Action::builder()
        .id(id)
        .kind(ActionKind::WriteFile)
        .path(path.to_string_lossy().to_string())
        .content(content)
        .build()
}

#[tokio::test]
async fn reapplied_batch_converges_without_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.conf");
    let queue = fast_queue();

    let reports = run_batch(&queue, vec![write_action(1, &path, "v1")], 1).await;
    assert!(reports[0].is_success());

    // Identical batch again: converged, nothing backed up.
    let reports = run_batch(&queue, vec![write_action(2, &path, "v1")], 1).await;
    assert!(reports[0].is_success());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "v1");
    assert!(!path.with_extension("conf.bak").exists());
}

#[tokio::test]
async fn changed_content_keeps_a_backup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.conf");
    let queue = fast_queue();

    run_batch(&queue, vec![write_action(1, &path, "v1")], 1).await;
    run_batch(&queue, vec![write_action(2, &path, "v2")], 1).await;

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "v2");
    let backup = dir.path().join("settings.conf.bak");
    assert_eq!(std::fs::read_to_string(&backup).unwrap(), "v1");
}

#[tokio::test]
async fn delete_structure_tolerates_absence() {
    let dir = tempfile::tempdir().unwrap();
    let tree = dir.path().join("opt/app");
    std::fs::create_dir_all(tree.join("logs")).unwrap();
    std::fs::write(tree.join("logs/app.log"), "x").unwrap();
    let queue = fast_queue();

    let delete = |id| {
        Action::builder()
            .id(id)
            .kind(ActionKind::DeleteStructure)
            .path(tree.to_string_lossy().to_string())
            .build()
    };

    let reports = run_batch(&queue, vec![delete(1)], 1).await;
    assert!(reports[0].is_success());
    assert!(!tree.exists());

    // Deleting what is already gone is converged, and structure actions
    // report success unconditionally anyway.
    let reports = run_batch(&queue, vec![delete(2)], 1).await;
    assert!(reports[0].is_success());
}
