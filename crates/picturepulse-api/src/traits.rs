//! Trait definitions for movie database providers.
//!
//! The OMDb client implements [`MovieProvider`]; the runtime only talks to
//! the trait so tests can substitute an in-process fake.

use std::future::Future;

/// A movie database that can be searched and queried for details.
pub trait MovieProvider: Send + Sync + 'static {
    type Error: ProviderError;

    /// Search for movies by title.
    fn search_movies(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<MovieSummary>, Self::Error>> + Send;

    /// Fetch the full record for a single movie by its provider id.
    fn movie_detail(&self, id: &str)
        -> impl Future<Output = Result<MovieDetail, Self::Error>> + Send;
}

/// Coarse classification of a failed provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never produced an HTTP response.
    Transport,
    /// The provider answered with a non-success HTTP status.
    Status(u16),
    /// The provider answered `Response: "False"`.
    NotFound,
    /// The body could not be decoded.
    Malformed,
}

/// Errors returned by a [`MovieProvider`] must be classifiable.
pub trait ProviderError: std::error::Error + Send + Sync + 'static {
    fn kind(&self) -> FailureKind;
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster: Option<String>,
}

/// Full movie record shown in the detail view.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster: Option<String>,
    /// Raw runtime text, e.g. `"142 min"` or `"N/A"`.
    pub runtime: String,
    /// Raw provider rating text, e.g. `"8.7"` or `"N/A"`.
    pub provider_rating: String,
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}
