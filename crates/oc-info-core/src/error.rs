//! Error taxonomy for oc-info.
//!
//! [`ClientError`] describes a single failed HTTP exchange. The pipeline
//! stages wrap it into an [`InfoError`] that names the stage and the URL.

use thiserror::Error;

/// Failure of a single request made through a [`crate::RegistryClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, connect, TLS, malformed URL).
    #[error("request failed: {0}")]
    Http(String),

    /// The server answered with a non-success status.
    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    /// The response carried no body.
    #[error("response body is empty")]
    EmptyBody,

    /// The response body was not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP client could not be constructed.
    #[error("invalid HTTP client configuration: {0}")]
    InvalidClient(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ClientError::Status {
                status: status.as_u16(),
            },
            None => ClientError::Http(err.to_string()),
        }
    }
}

/// Errors produced by oc-info. Every variant is terminal for the process.
#[derive(Debug, Error)]
pub enum InfoError {
    /// Malformed or missing command-line arguments.
    #[error("{0}")]
    Usage(String),

    /// The registry root could not be listed or is not an OC registry.
    #[error("oc registry url is not valid: {url} ({reason})")]
    Registry { url: String, reason: String },

    /// A component metadata request failed; the whole batch is discarded.
    #[error("failed to fetch component info from {url}: {reason}")]
    Fetch { url: String, reason: String },
}

impl InfoError {
    pub(crate) fn registry(url: &str, reason: impl ToString) -> Self {
        InfoError::Registry {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn fetch(url: &str, reason: impl ToString) -> Self {
        InfoError::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result alias for oc-info operations.
pub type InfoResult<T> = std::result::Result<T, InfoError>;

/// Result alias for single registry requests.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
