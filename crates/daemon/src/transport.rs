// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP transport to the controller.
//!
//! The trait is the seam the session loop is tested through; the real
//! implementation posts JSON over HTTPS with reqwest.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use drover_wire::{
    HeartbeatRequest, HeartbeatResponse, RegistrationRequest, RegistrationResponse,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("controller returned status {status}")]
    Status { status: u16 },
}

/// What the session loop needs from the controller connection.
#[async_trait]
pub trait ControllerClient: Send + Sync {
    async fn register(
        &self,
        hostname: &str,
        request: &RegistrationRequest,
    ) -> Result<RegistrationResponse, TransportError>;

    async fn heartbeat(
        &self,
        hostname: &str,
        request: &HeartbeatRequest,
    ) -> Result<HeartbeatResponse, TransportError>;
}

/// reqwest-backed controller connection.
///
/// The client is cached across requests so heartbeats reuse connections;
/// any transport error drops the cache, and the next attempt starts from
/// fresh sockets.
pub struct HttpController {
    base_url: String,
    client: Mutex<Option<reqwest::Client>>,
}

impl HttpController {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            base_url: format!("https://{host}:{port}"),
            client: Mutex::new(None),
        }
    }

    fn client(&self) -> Result<reqwest::Client, TransportError> {
        let mut slot = self.client.lock();
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        *slot = Some(client.clone());
        Ok(client)
    }

    fn invalidate(&self) {
        *self.client.lock() = None;
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, TransportError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let client = self.client()?;
        let url = format!("{}{path}", self.base_url);
        let result = async {
            let response = client.post(&url).json(body).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(TransportError::Status {
                    status: status.as_u16(),
                });
            }
            Ok(response.json::<R>().await?)
        }
        .await;
        if result.is_err() {
            self.invalidate();
        }
        result
    }
}

#[async_trait]
impl ControllerClient for HttpController {
    async fn register(
        &self,
        hostname: &str,
        request: &RegistrationRequest,
    ) -> Result<RegistrationResponse, TransportError> {
        self.post(&drover_wire::register_path(hostname), request).await
    }

    async fn heartbeat(
        &self,
        hostname: &str,
        request: &HeartbeatRequest,
    ) -> Result<HeartbeatResponse, TransportError> {
        self.post(&drover_wire::heartbeat_path(hostname), request).await
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
