// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::Action;

#[test]
fn skeleton_copies_action_identity() {
    let action = Action::builder()
        .id(42)
        .kind(ActionKind::Run)
        .cluster_id("alpha")
        .component("hbase")
        .role("regionserver")
        .build();

    let report = CommandReport::for_action(&action);
    assert_eq!(report.id, 42);
    assert_eq!(report.kind, ActionKind::Run);
    assert_eq!(report.cluster_id.as_deref(), Some("alpha"));
    assert_eq!(report.component.as_deref(), Some("hbase"));
    assert_eq!(report.role.as_deref(), Some("regionserver"));
    assert!(report.is_success());
}

#[test]
fn wire_field_names_are_camel_case() {
    let action = Action::builder().id(3).kind(ActionKind::WriteFile).build();
    let mut report = CommandReport::for_action(&action);
    report.exit_code = 1;
    report.retry_action_count = 2;

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["exitCode"], 1);
    assert_eq!(json["retryActionCount"], 2);
    assert_eq!(json["kind"], "WRITE_FILE");
    assert_eq!(json["clusterDefinitionRevision"], 1);
}

#[test]
fn nonzero_exit_is_failure() {
    let action = Action::builder().build();
    let mut report = CommandReport::for_action(&action);
    report.exit_code = 255;
    assert!(!report.is_success());
}
