// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! drover-engine: the serialized action queue.
//!
//! Actions submitted by the controller flow through a FIFO drained by one
//! worker task; each action is dispatched to its kind's handler, retried
//! up to a configured bound, and turned into exactly one terminal
//! [`CommandReport`](drover_core::CommandReport) on the outgoing side.
//! A single worker drains the FIFO, so two actions never mutate
//! overlapping filesystem state concurrently.

mod error;
mod handlers;
mod queue;
mod worker;

pub use error::EngineError;
pub use queue::{ActionQueue, QueueTuning, Work};
pub use worker::run_worker;
