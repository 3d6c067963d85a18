use serde::Deserialize;

use crate::traits::{MovieDetail, MovieSummary};

/// Placeholder OMDb uses for any missing field.
const NOT_AVAILABLE: &str = "N/A";

// ── Response types ───────────────────────────────────────────────

/// `?s=` search response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbSearchResponse {
    #[serde(default)]
    pub search: Vec<OmdbSearchItem>,
    pub response: String,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbSearchItem {
    pub title: String,
    #[serde(default)]
    pub year: String,
    pub poster: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
}

/// `?i=` detail response. Every field is optional because a
/// `Response: "False"` body carries only `Response` and `Error`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbDetailResponse {
    pub title: Option<String>,
    pub year: Option<String>,
    pub poster: Option<String>,
    pub runtime: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    pub plot: Option<String>,
    pub released: Option<String>,
    pub actors: Option<String>,
    pub director: Option<String>,
    pub genre: Option<String>,
    pub response: String,
    pub error: Option<String>,
}

/// OMDb encodes success as the string `"True"`.
pub fn is_success(response: &str) -> bool {
    response.eq_ignore_ascii_case("true")
}

fn poster_url(poster: Option<String>) -> Option<String> {
    poster.filter(|p| !p.is_empty() && p != NOT_AVAILABLE)
}

// ── Conversions ──────────────────────────────────────────────────

impl OmdbSearchItem {
    pub fn into_summary(self) -> MovieSummary {
        MovieSummary {
            id: self.imdb_id,
            title: self.title,
            year: self.year,
            poster: poster_url(self.poster),
        }
    }
}

impl OmdbDetailResponse {
    /// Convert to a [`MovieDetail`]. `requested_id` fills in the id when the
    /// body omits it.
    pub fn into_detail(self, requested_id: &str) -> MovieDetail {
        let text = |v: Option<String>| v.unwrap_or_else(|| NOT_AVAILABLE.to_string());
        MovieDetail {
            id: self.imdb_id.unwrap_or_else(|| requested_id.to_string()),
            title: self.title.unwrap_or_default(),
            year: self.year.unwrap_or_default(),
            poster: poster_url(self.poster),
            runtime: text(self.runtime),
            provider_rating: text(self.imdb_rating),
            plot: text(self.plot),
            released: text(self.released),
            actors: text(self.actors),
            director: text(self.director),
            genre: text(self.genre),
        }
    }
}
