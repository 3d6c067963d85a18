use thiserror::Error;

use crate::traits::{FailureKind, ProviderError};

/// Errors from the OMDb API client.
#[derive(Debug, Error)]
pub enum OmdbError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl ProviderError for OmdbError {
    fn kind(&self) -> FailureKind {
        match self {
            Self::Http(_) => FailureKind::Transport,
            Self::Api { status, .. } => FailureKind::Status(*status),
            Self::NotFound(_) => FailureKind::NotFound,
            Self::Parse(_) => FailureKind::Malformed,
        }
    }
}
