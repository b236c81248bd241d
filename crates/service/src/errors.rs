use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid key: {0:?} is not an integer")]
    InvalidKey(String),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode records: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Failures caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidKey(_) | Self::InvalidBody(_) | Self::NotFound(_))
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            Self::InvalidKey(_) => 1001,
            Self::InvalidBody(_) => 1002,
            Self::NotFound(_) => 1003,
            Self::Decode { .. } => 1101,
            Self::Encode(_) => 1102,
            Self::Io { .. } => 1200,
        }
    }
}
