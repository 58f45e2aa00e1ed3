// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The single worker task draining the FIFO.

use tokio_util::sync::CancellationToken;

use drover_core::{Action, ActionKind, CommandReport, ProcessKey};
use drover_resource::ServiceResource;

use crate::{handlers, ActionQueue, Work};

/// Drain the queue until cancelled. One item at a time; a slow action
/// delays everything queued behind it.
pub async fn run_worker(queue: &ActionQueue, cancel: CancellationToken) {
    tracing::info!("action worker started");
    loop {
        if cancel.is_cancelled() {
            tracing::info!("action worker stopping");
            return;
        }

        match queue.pop() {
            Some(Work::Stop(key)) => stop_component(queue, &key).await,
            Some(Work::Action(action)) => {
                let report = run_with_retry(queue, &action, &cancel).await;
                queue.publish(report);
            }
            None => {
                tokio::select! {
                    () = cancel.cancelled() => {}
                    () = tokio::time::sleep(queue.tuning().poll_interval) => {}
                }
            }
        }
    }
}

async fn stop_component(queue: &ActionQueue, key: &ProcessKey) {
    if let Err(err) = ServiceResource::stop(key, queue.registry()).await {
        tracing::warn!(key = %key, error = %err, "failed to stop component");
    }
}

/// Run one action to a terminal report.
///
/// Retries while the attempt reports a non-zero exit, up to
/// `max_retries` attempts with a fixed sleep between them. Handler errors
/// count as failed attempts with the error text captured. An attempt that
/// produces no output at all counts as success.
pub(crate) async fn run_with_retry(
    queue: &ActionQueue,
    action: &Action,
    cancel: &CancellationToken,
) -> CommandReport {
    let mut report = CommandReport::for_action(action);

    if action.kind == ActionKind::Unknown {
        report.exit_code = 1;
        report.stderr = "unknown action kind".to_string();
        tracing::warn!(id = action.id, "unknown action kind, failing without retry");
        return report;
    }

    let max_retries = queue.tuning().max_retries.max(1);
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match handlers::apply(queue, action).await {
            Ok(Some(output)) => {
                report.exit_code = output.exit_code;
                report.stdout = output.stdout;
                report.stderr = output.stderr;
            }
            // Absent outcome counts as success (see DESIGN.md).
            Ok(None) => {
                report.exit_code = 0;
            }
            Err(err) => {
                report.exit_code = err.exit_code();
                report.stderr = err.to_string();
            }
        }

        if report.exit_code == 0 || attempts >= max_retries || cancel.is_cancelled() {
            break;
        }

        tracing::warn!(
            id = action.id,
            kind = %action.kind,
            attempt = attempts,
            exit_code = report.exit_code,
            "action attempt failed, retrying"
        );
        run_clean_up(action).await;

        let sleep = queue.tuning().sleep_between_retries;
        if !sleep.is_zero() {
            tokio::select! {
                () = cancel.cancelled() => {}
                () = tokio::time::sleep(sleep) => {}
            }
        }
    }

    report.retry_action_count = attempts;
    if report.exit_code == 0 {
        tracing::info!(id = action.id, kind = %action.kind, attempts, "action succeeded");
    } else {
        tracing::warn!(
            id = action.id,
            kind = %action.kind,
            attempts,
            exit_code = report.exit_code,
            "action failed terminally"
        );
    }
    report
}

/// Failed attempts of a RUN action trigger its clean-up command before the
/// next try; clean-up failures are logged and otherwise ignored.
async fn run_clean_up(action: &Action) {
    let Some(clean_up) = &action.clean_up_command else {
        return;
    };
    if action.kind != ActionKind::Run {
        return;
    }
    let mut invocation = drover_shell::Invocation::sh(clean_up.clone());
    if let Some(user) = &action.user {
        invocation = invocation.user(user.clone());
    }
    match drover_shell::run(&invocation).await {
        Ok(output) if !output.is_success() => {
            tracing::warn!(id = action.id, exit_code = output.exit_code, "clean-up command failed");
        }
        Err(err) => {
            tracing::warn!(id = action.id, error = %err, "clean-up command errored");
        }
        Ok(_) => {}
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
