// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The action FIFO and the stop-before-start reconciliation at submit time.

use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use drover_core::{Action, ActionKind, CommandReport, ProcessKey};
use drover_resource::ProcessRegistry;

/// One queue entry: either a controller action or a synthesized stop for a
/// component the controller no longer wants running. The wire kind set has
/// no STOP, so stops never appear as actions.
#[derive(Debug, Clone)]
pub enum Work {
    Stop(ProcessKey),
    Action(Action),
}

/// Worker tuning, lifted from the agent config.
#[derive(Debug, Clone)]
pub struct QueueTuning {
    /// Attempts per action before the failure report is emitted.
    pub max_retries: u32,
    /// Sleep between attempts.
    pub sleep_between_retries: Duration,
    /// Sleep when the FIFO is empty.
    pub poll_interval: Duration,
    /// Timeout applied to each shell command a handler runs; None disables.
    pub command_timeout: Option<Duration>,
    /// Driver script prepended to INSTALL_AND_CONFIG artifacts when the
    /// action carries no explicit command.
    pub driver_script: Option<PathBuf>,
}

impl Default for QueueTuning {
    fn default() -> Self {
        Self {
            max_retries: 2,
            sleep_between_retries: Duration::from_secs(5),
            poll_interval: Duration::from_secs(1),
            command_timeout: Some(Duration::from_secs(600)),
            driver_script: None,
        }
    }
}

/// The inbound FIFO, the outgoing report buffer, and the process registry.
///
/// Constructed once and shared by reference between the heartbeat side
/// (submit / drain) and the worker task (pop / publish); the two sides
/// communicate through nothing else.
pub struct ActionQueue {
    pending: Mutex<VecDeque<Work>>,
    reports: Mutex<Vec<CommandReport>>,
    registry: Arc<ProcessRegistry>,
    applied_config: Mutex<Option<i64>>,
    tuning: QueueTuning,
}

impl ActionQueue {
    pub fn new(tuning: QueueTuning) -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
            reports: Mutex::new(Vec::new()),
            registry: Arc::new(ProcessRegistry::new()),
            applied_config: Mutex::new(None),
            tuning,
        }
    }

    /// Enqueue a command batch.
    ///
    /// Before anything from the batch goes in, every currently running
    /// component that the batch's START set no longer names gets a stop
    /// entry. Stop-before-start is a hard ordering invariant; it holds by
    /// queue position, not by locking.
    pub fn submit(&self, batch: Vec<Action>) {
        let wanted: HashSet<ProcessKey> = batch
            .iter()
            .filter(|a| a.kind == ActionKind::Start)
            .map(|a| a.process_key())
            .collect();

        let mut pending = self.pending.lock();
        for key in self.registry.running() {
            if !wanted.contains(&key) {
                tracing::info!(key = %key, "component absent from new start set, stopping");
                pending.push_back(Work::Stop(key));
            }
        }
        for action in batch {
            tracing::debug!(id = action.id, kind = %action.kind, "action enqueued");
            pending.push_back(Work::Action(action));
        }
    }

    /// True iff the FIFO is empty right now. Says nothing about an action
    /// currently mid-execution.
    pub fn is_idle(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Take all reports accumulated since the last drain.
    pub fn drain_reports(&self) -> Vec<CommandReport> {
        std::mem::take(&mut *self.reports.lock())
    }

    /// Id of the most recently applied configuration artifact.
    pub fn applied_config(&self) -> Option<i64> {
        *self.applied_config.lock()
    }

    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    pub(crate) fn tuning(&self) -> &QueueTuning {
        &self.tuning
    }

    pub(crate) fn pop(&self) -> Option<Work> {
        self.pending.lock().pop_front()
    }

    pub(crate) fn publish(&self, report: CommandReport) {
        self.reports.lock().push(report);
    }

    pub(crate) fn record_applied_config(&self, id: i64) {
        *self.applied_config.lock() = Some(id);
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
