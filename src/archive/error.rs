use crate::transport::error::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Archive API returned status {status} for {url}: {reason}")]
    Upstream {
        url: String,
        status: reqwest::StatusCode,
        reason: String,
    },

    #[error("Failed to decode archive response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Archive response from {url} has no daily values for '{variable}'")]
    MissingVariable { url: String, variable: String },

    #[error("Archive response from {url} has malformed timestamps: {message}")]
    MalformedTime { url: String, message: String },
}

impl ArchiveError {
    /// Whether the archive host (rather than local I/O) is at fault.
    pub fn is_upstream(&self) -> bool {
        match self {
            ArchiveError::Transport(e) => e.is_upstream(),
            _ => true,
        }
    }
}
