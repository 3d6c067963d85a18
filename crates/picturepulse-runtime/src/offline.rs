use picturepulse_api::traits::{
    FailureKind, MovieDetail, MovieProvider, MovieSummary, ProviderError,
};

/// Provider for sessions opened without an API key. Every call fails as a
/// transport error, so only the watched list is usable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

#[derive(Debug, thiserror::Error)]
#[error("no movie database configured (set provider.api_key)")]
pub struct OfflineError;

impl ProviderError for OfflineError {
    fn kind(&self) -> FailureKind {
        FailureKind::Transport
    }
}

impl MovieProvider for Offline {
    type Error = OfflineError;

    async fn search_movies(&self, _query: &str) -> Result<Vec<MovieSummary>, OfflineError> {
        Err(OfflineError)
    }

    async fn movie_detail(&self, _id: &str) -> Result<MovieDetail, OfflineError> {
        Err(OfflineError)
    }
}
