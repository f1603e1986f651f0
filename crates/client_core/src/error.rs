use thiserror::Error;

/// Anything that went wrong between issuing a request and decoding its response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid API base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("{method} {url} failed: {source}")]
    Request {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },
    #[error("failed to decode response from {method} {url}: {source}")]
    Decode {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("user directory unavailable: {0}")]
    Unavailable(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
