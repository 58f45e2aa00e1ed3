// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    start = { ActionKind::Start, "START" },
    run = { ActionKind::Run, "RUN" },
    create = { ActionKind::CreateStructure, "CREATE_STRUCTURE" },
    delete = { ActionKind::DeleteStructure, "DELETE_STRUCTURE" },
    write_file = { ActionKind::WriteFile, "WRITE_FILE" },
    install = { ActionKind::InstallAndConfig, "INSTALL_AND_CONFIG" },
    no_op = { ActionKind::NoOp, "NO_OP" },
)]
fn kind_serializes_verbatim(kind: ActionKind, wire: &str) {
    let json = serde_json::to_string(&kind).unwrap();
    assert_eq!(json, format!("\"{wire}\""));
    let back: ActionKind = serde_json::from_str(&json).unwrap();
    assert_eq!(back, kind);
}

#[test]
fn unrecognized_kind_maps_to_unknown() {
    let kind: ActionKind = serde_json::from_str("\"DECOMMISSION\"").unwrap();
    assert_eq!(kind, ActionKind::Unknown);
}

#[test]
fn run_action_alias_accepted() {
    let kind: ActionKind = serde_json::from_str("\"RUN_ACTION\"").unwrap();
    assert_eq!(kind, ActionKind::Run);
}

#[test]
fn deserializes_controller_payload() {
    let json = r#"{
        "id": 7,
        "kind": "WRITE_FILE",
        "clusterId": "alpha",
        "clusterDefinitionRevision": 3,
        "component": "namenode",
        "role": "master",
        "path": "/tmp/x",
        "content": "a",
        "user": "hdfs"
    }"#;
    let action: Action = serde_json::from_str(json).unwrap();
    assert_eq!(action.id, 7);
    assert_eq!(action.kind, ActionKind::WriteFile);
    assert_eq!(action.cluster_id, "alpha");
    assert_eq!(action.cluster_definition_revision, 3);
    assert_eq!(action.path.as_deref(), Some("/tmp/x"));
    assert_eq!(action.content.as_deref(), Some("a"));
    assert_eq!(action.user.as_deref(), Some("hdfs"));
    assert!(action.command.is_none());
}

#[test]
fn missing_optional_fields_default() {
    let action: Action = serde_json::from_str(r#"{"id": 1, "kind": "NO_OP"}"#).unwrap();
    assert_eq!(action.cluster_id, "");
    assert_eq!(action.cluster_definition_revision, 0);
    assert!(action.clean_up_command.is_none());
}

#[test]
fn process_key_copies_identity_fields() {
    let action = Action::builder()
        .cluster_id("c1")
        .cluster_definition_revision(9)
        .component("datanode")
        .role("slave")
        .build();
    let key = action.process_key();
    assert_eq!(key.cluster_id, "c1");
    assert_eq!(key.cluster_definition_revision, 9);
    assert_eq!(key.component, "datanode");
    assert_eq!(key.role, "slave");
}

#[test]
fn optional_fields_skipped_when_absent() {
    let action = Action::builder().kind(ActionKind::NoOp).build();
    let json = serde_json::to_string(&action).unwrap();
    assert!(!json.contains("command"));
    assert!(!json.contains("content"));
}
