// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch in, reports out, heartbeat payload on the wire.

use crate::prelude::*;
use drover_wire::{HeartbeatRequest, HeartbeatResponse};

#[tokio::test]
async fn batch_reports_ride_the_next_heartbeat() {
    let dir = tempfile::tempdir().unwrap();
    let conf_dir = dir.path().join("conf");
    let file = conf_dir.join("app.properties");
    let queue = fast_queue();

    let batch = vec![
        Action::builder()
            .id(1)
            .kind(ActionKind::CreateStructure)
            .path(conf_dir.to_string_lossy().to_string())
            .build(),
        Action::builder()
            .id(2)
            .kind(ActionKind::WriteFile)
            .path(file.to_string_lossy().to_string())
            .content("a=1\n")
            .build(),
        Action::builder()
            .id(3)
            .kind(ActionKind::Run)
            .command("/bin/true")
            .build(),
    ];
    let reports = run_batch(&queue, batch, 3).await;

    assert_eq!(reports.len(), 3);
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "a=1\n");
    // FIFO order survives into the report stream.
    assert_eq!(
        reports.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(reports.iter().all(CommandReport::is_success));

    let payload = HeartbeatRequest {
        response_id: 7,
        timestamp: 0,
        reports,
        idle: queue.is_idle(),
        applied_config: queue.applied_config(),
    };
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["responseId"], 7);
    assert_eq!(json["idle"], true);
    assert_eq!(json["reports"][0]["id"], 1);
    assert_eq!(json["reports"][0]["exitCode"], 0);
    assert_eq!(json["reports"][1]["kind"], "WRITE_FILE");
}

#[tokio::test]
async fn failure_reports_carry_attempt_counts() {
    let queue = fast_queue();
    let reports = run_batch(
        &queue,
        vec![Action::builder()
            .id(4)
            .kind(ActionKind::Run)
            .command("/bin/false")
            .build()],
        1,
    )
    .await;

    assert_eq!(reports[0].exit_code, 1);
    assert_eq!(reports[0].retry_action_count, 2);

    let json = serde_json::to_value(&reports[0]).unwrap();
    assert_eq!(json["retryActionCount"], 2);
}

#[tokio::test]
async fn controller_batch_parses_and_executes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("from-wire");
    let text = format!(
        r#"{{
            "responseId": 12,
            "restartAgent": "false",
            "executionCommands": [{{
                "id": 9,
                "kind": "WRITE_FILE",
                "clusterId": "c1",
                "clusterDefinitionRevision": 4,
                "component": "web",
                "role": "server",
                "path": "{}",
                "content": "hello"
            }}]
        }}"#,
        path.display()
    );
    let response: HeartbeatResponse = serde_json::from_str(&text).unwrap();
    assert!(!response.restart_agent);

    let queue = fast_queue();
    let reports = run_batch(&queue, response.execution_commands, 1).await;

    assert_eq!(reports[0].exit_code, 0);
    assert_eq!(reports[0].cluster_id.as_deref(), Some("c1"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
}
