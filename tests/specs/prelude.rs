// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for the end-to-end specs.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

pub use drover_core::{Action, ActionKind, CommandReport};
pub use drover_engine::{ActionQueue, QueueTuning};

pub fn fast_queue() -> Arc<ActionQueue> {
    Arc::new(ActionQueue::new(QueueTuning {
        max_retries: 2,
        sleep_between_retries: Duration::ZERO,
        poll_interval: Duration::from_millis(10),
        command_timeout: Some(Duration::from_secs(30)),
        driver_script: None,
    }))
}

/// Submit a batch, run the worker until `expected` reports land, stop it.
pub async fn run_batch(
    queue: &Arc<ActionQueue>,
    batch: Vec<Action>,
    expected: usize,
) -> Vec<CommandReport> {
    queue.submit(batch);
    let cancel = CancellationToken::new();
    let worker = {
        let queue = Arc::clone(queue);
        let cancel = cancel.clone();
        tokio::spawn(async move { drover_engine::run_worker(&queue, cancel).await })
    };

    let mut reports = Vec::new();
    for _ in 0..200 {
        reports.extend(queue.drain_reports());
        if reports.len() >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    cancel.cancel();
    worker.await.unwrap();
    reports
}
