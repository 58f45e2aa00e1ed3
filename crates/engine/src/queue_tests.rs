// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use drover_core::ActionKind;
use drover_resource::ServiceResource;

fn start_action(id: i64, component: &str) -> Action {
    Action::builder()
        .id(id)
        .kind(ActionKind::Start)
        .component(component)
        .command("sleep 60")
        .build()
}

#[test]
fn idle_tracks_fifo_emptiness() {
    let queue = ActionQueue::new(QueueTuning::default());
    assert!(queue.is_idle());

    queue.submit(vec![Action::builder().id(1).kind(ActionKind::NoOp).build()]);
    assert!(!queue.is_idle());

    queue.pop();
    assert!(queue.is_idle());
}

#[test]
fn reports_drain_once() {
    let queue = ActionQueue::new(QueueTuning::default());
    let action = Action::builder().id(1).build();
    queue.publish(drover_core::CommandReport::for_action(&action));

    assert_eq!(queue.drain_reports().len(), 1);
    assert!(queue.drain_reports().is_empty());
}

#[tokio::test]
async fn stops_emitted_before_new_batch() {
    let queue = ActionQueue::new(QueueTuning::default());

    // Running set {A, B}.
    for component in ["A", "B"] {
        let key = drover_core::ProcessKey::new("test-cluster", 1, component, "role");
        ServiceResource::new(key, "sleep 60").start(queue.registry()).unwrap();
    }

    // New batch starts only {B, C}: A must be stopped first.
    queue.submit(vec![start_action(1, "B"), start_action(2, "C")]);

    match queue.pop() {
        Some(Work::Stop(key)) => assert_eq!(key.component, "A"),
        other => panic!("expected Stop(A) first, got {other:?}"),
    }
    match queue.pop() {
        Some(Work::Action(action)) => assert_eq!(action.component, "B"),
        other => panic!("expected action B, got {other:?}"),
    }
    match queue.pop() {
        Some(Work::Action(action)) => assert_eq!(action.component, "C"),
        other => panic!("expected action C, got {other:?}"),
    }
    assert!(queue.pop().is_none());

    // Clean up the spawned processes.
    for component in ["A", "B"] {
        let key = drover_core::ProcessKey::new("test-cluster", 1, component, "role");
        ServiceResource::stop(&key, queue.registry()).await.unwrap();
    }
}

#[tokio::test]
async fn batch_with_no_starts_stops_everything_running() {
    let queue = ActionQueue::new(QueueTuning::default());
    let key = drover_core::ProcessKey::new("test-cluster", 1, "A", "role");
    ServiceResource::new(key.clone(), "sleep 60").start(queue.registry()).unwrap();

    queue.submit(vec![Action::builder().id(1).kind(ActionKind::NoOp).build()]);

    assert!(matches!(queue.pop(), Some(Work::Stop(k)) if k == key));

    ServiceResource::stop(&key, queue.registry()).await.unwrap();
}

#[test]
fn applied_config_marker_is_most_recent_only() {
    let queue = ActionQueue::new(QueueTuning::default());
    assert_eq!(queue.applied_config(), None);
    queue.record_applied_config(10);
    queue.record_applied_config(11);
    assert_eq!(queue.applied_config(), Some(11));
}
