use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Invalid request URL '{0}'")]
    InvalidUrl(String, #[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("Failed to read response body from {0}")]
    BodyRead(String, #[source] reqwest::Error),

    #[error("HTTP request to {url} still failing with status {status} after {attempts} attempts")]
    RetriesExhausted {
        url: String,
        status: reqwest::StatusCode,
        attempts: u32,
    },

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to read cache file '{0}'")]
    CacheRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to write cache file '{0}'")]
    CacheWrite(PathBuf, #[source] std::io::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl TransportError {
    /// Whether the failure lies with the remote host rather than with local I/O.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            TransportError::NetworkRequest(..)
                | TransportError::BodyRead(..)
                | TransportError::RetriesExhausted { .. }
        )
    }
}
