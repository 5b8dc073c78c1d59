//! HTTP access to the registry.
//!
//! [`RegistryClient`] is the seam the lister and fetcher talk through.
//! [`HttpRegistryClient`] is the reqwest-backed implementation used by the
//! binary; tests plug in [`crate::fakes::MemoryRegistryClient`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Environment variable overriding the `User-Agent` header.
pub const USER_AGENT_ENV: &str = "OC_INFO_USER_AGENT";

/// Issues a single JSON GET request.
///
/// Implementations make exactly one attempt per call and never retry.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// GET `url` and parse the response body as JSON.
    async fn get_json(&self, url: &str) -> ClientResult<Value>;
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// `User-Agent` header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Create a config from environment variables
    pub fn from_env() -> Self {
        match std::env::var(USER_AGENT_ENV) {
            Ok(agent) if !agent.trim().is_empty() => Self::default().with_user_agent(&agent),
            _ => Self::default(),
        }
    }

    /// Set the `User-Agent` header
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }
}

fn default_user_agent() -> String {
    format!("oc-info/{}", crate::VERSION)
}

/// reqwest-backed [`RegistryClient`].
///
/// No request timeout is configured: a request that never completes keeps the
/// invocation waiting.
#[derive(Debug, Clone)]
pub struct HttpRegistryClient {
    http_client: reqwest::Client,
}

impl HttpRegistryClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::InvalidClient(e.to_string()))?;

        Ok(HttpRegistryClient { http_client })
    }
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    async fn get_json(&self, url: &str) -> ClientResult<Value> {
        debug!(url = %url, "GET");
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_body(&body)
    }
}

/// Parse a response body, treating a blank body as missing.
pub(crate) fn parse_body(body: &str) -> ClientResult<Value> {
    if body.trim().is_empty() {
        return Err(ClientError::EmptyBody);
    }
    Ok(serde_json::from_str(body)?)
}
