// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The registration/heartbeat session with the controller.
//!
//! The controller is the only authority: the agent registers, then sends
//! heartbeats carrying drained reports and receives command batches back.
//! Sequence numbers must advance by exactly one per accepted heartbeat;
//! anything else ends the session.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::Rng;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use drover_core::AgentConfig;
use drover_engine::ActionQueue;
use drover_wire::{HeartbeatRequest, HeartbeatResponse, RegistrationRequest};

use crate::transport::ControllerClient;

/// Exit code a supervisor treats as "start me again".
pub const AGENT_RESTART_EXIT_CODE: i32 = 77;

/// Where the agent sits in its conversation with the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Unregistered,
    Registering,
    Heartbeating,
    Restarting,
}

drover_core::simple_display! {
    AgentState {
        Unregistered => "unregistered",
        Registering => "registering",
        Heartbeating => "heartbeating",
        Restarting => "restarting",
    }
}

/// Why [`HeartbeatController::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The controller asked for a restart, or the sequence went out of step.
    Restart,
    /// Shutdown was requested.
    Stopped,
}

enum LoopExit {
    Reregister,
    Restart,
    Stopped,
}

/// Drives one agent session end to end.
pub struct HeartbeatController<C> {
    client: C,
    queue: Arc<ActionQueue>,
    config: AgentConfig,
    hostname: String,
    cancel: CancellationToken,
    state: AgentState,
    response_id: i64,
}

impl<C: ControllerClient> HeartbeatController<C> {
    pub fn new(
        client: C,
        queue: Arc<ActionQueue>,
        config: AgentConfig,
        hostname: String,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            client,
            queue,
            config,
            hostname,
            cancel,
            state: AgentState::Unregistered,
            response_id: -1,
        }
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    /// Run the session until shutdown or a condition that requires a
    /// process restart.
    pub async fn run(&mut self) -> SessionOutcome {
        loop {
            if !self.register().await {
                return SessionOutcome::Stopped;
            }
            match self.heartbeat_loop().await {
                LoopExit::Reregister => continue,
                LoopExit::Restart => {
                    self.state = AgentState::Restarting;
                    return SessionOutcome::Restart;
                }
                LoopExit::Stopped => return SessionOutcome::Stopped,
            }
        }
    }

    /// Register with the controller, retrying forever with a randomized
    /// delay. False means shutdown interrupted the attempts.
    async fn register(&mut self) -> bool {
        self.state = AgentState::Registering;
        let previous = (self.response_id >= 0).then_some(self.response_id);
        self.response_id = -1;
        loop {
            let request = RegistrationRequest {
                hostname: self.hostname.clone(),
                agent_version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: now_ms(),
                previous_response_id: previous,
            };
            match self.client.register(&self.hostname, &request).await {
                Ok(response) => {
                    info!(response_id = response.response_id, "registered with controller");
                    self.response_id = response.response_id;
                    if !response.status_commands.is_empty() {
                        self.queue.submit(response.status_commands);
                    }
                    self.state = AgentState::Heartbeating;
                    return true;
                }
                Err(err) => {
                    warn!(error = %err, "registration failed");
                    if !self.pause(self.reconnect_delay()).await {
                        return false;
                    }
                }
            }
        }
    }

    async fn heartbeat_loop(&mut self) -> LoopExit {
        loop {
            let request = HeartbeatRequest {
                response_id: self.response_id,
                timestamp: now_ms(),
                reports: self.queue.drain_reports(),
                idle: self.queue.is_idle(),
                applied_config: self.queue.applied_config(),
            };
            let response = match self.deliver(&request).await {
                Some(response) => response,
                None => return LoopExit::Stopped,
            };

            if response.response_id != request.response_id + 1 {
                warn!(
                    sent = request.response_id,
                    received = response.response_id,
                    "heartbeat sequence out of step"
                );
                return LoopExit::Restart;
            }
            self.response_id = response.response_id;

            if !response.execution_commands.is_empty() {
                self.queue.submit(response.execution_commands);
            }
            if !response.status_commands.is_empty() {
                self.queue.submit(response.status_commands);
            }
            if response.registration_command.is_some() {
                info!("controller requested re-registration");
                return LoopExit::Reregister;
            }
            if response.restart_agent {
                info!("controller requested agent restart");
                return LoopExit::Restart;
            }

            if !self.pause(self.heartbeat_interval()).await {
                return LoopExit::Stopped;
            }
        }
    }

    /// Deliver one heartbeat, retrying the identical payload until the
    /// controller accepts it. Reports drained into a payload are never
    /// rebuilt, so a delivery failure cannot drop them.
    async fn deliver(&self, request: &HeartbeatRequest) -> Option<HeartbeatResponse> {
        loop {
            match self.client.heartbeat(&self.hostname, request).await {
                Ok(response) => return Some(response),
                Err(err) => {
                    warn!(error = %err, "heartbeat delivery failed");
                    if !self.pause(self.reconnect_delay()).await {
                        return None;
                    }
                }
            }
        }
    }

    fn heartbeat_interval(&self) -> Duration {
        if self.queue.is_idle() {
            Duration::from_secs(self.config.heartbeat_idle_interval)
        } else {
            Duration::from_secs(self.config.heartbeat_busy_interval)
        }
    }

    /// Uniform delay in [0, connect_retry_range] so a controller restart
    /// is not met by every agent reconnecting in the same second.
    fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(rand::thread_rng().gen_range(0..=self.config.connect_retry_range))
    }

    /// Sleep unless shutdown arrives first; false means shutdown.
    async fn pause(&self, duration: Duration) -> bool {
        tokio::select! {
            () = self.cancel.cancelled() => false,
            () = tokio::time::sleep(duration) => true,
        }
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
