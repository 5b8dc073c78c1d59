//! In-memory fake for the registry client (testing only)
//!
//! [`MemoryRegistryClient`] answers from a `HashMap<url, response>` and keeps
//! a log of every URL it was asked for.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::RegistryClient;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone)]
enum CannedResponse {
    Json(Value),
    Status(u16),
    Transport(String),
}

/// Canned-response registry client.
///
/// URLs without a canned response answer `404`.
#[derive(Debug, Default)]
pub struct MemoryRegistryClient {
    responses: HashMap<String, CannedResponse>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<String>>,
}

impl MemoryRegistryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `body`.
    pub fn with_json(mut self, url: &str, body: Value) -> Self {
        self.responses
            .insert(url.to_string(), CannedResponse::Json(body));
        self
    }

    /// Answer `url` with an HTTP error status.
    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses
            .insert(url.to_string(), CannedResponse::Status(status));
        self
    }

    /// Fail `url` at the transport level.
    pub fn with_transport_error(mut self, url: &str, reason: &str) -> Self {
        self.responses
            .insert(url.to_string(), CannedResponse::Transport(reason.to_string()));
        self
    }

    /// Hold the answer for `url` back by `delay`.
    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    /// URLs requested so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RegistryClient for MemoryRegistryClient {
    async fn get_json(&self, url: &str) -> ClientResult<Value> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(url.to_string());
        }

        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }

        match self.responses.get(url) {
            Some(CannedResponse::Json(body)) => Ok(body.clone()),
            Some(CannedResponse::Status(status)) => Err(ClientError::Status { status: *status }),
            Some(CannedResponse::Transport(reason)) => Err(ClientError::Http(reason.clone())),
            None => Err(ClientError::Status { status: 404 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_client_serves_canned_json_and_logs() {
        let client = MemoryRegistryClient::new().with_json("http://r", json!({"ok": true}));
        let body = client.get_json("http://r").await.unwrap();
        assert_eq!(body, json!({"ok": true}));
        assert_eq!(client.requests(), vec!["http://r".to_string()]);
    }

    #[tokio::test]
    async fn test_memory_client_unknown_url_is_404() {
        let client = MemoryRegistryClient::new();
        let err = client.get_json("http://nowhere").await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 404 }));
    }
}
