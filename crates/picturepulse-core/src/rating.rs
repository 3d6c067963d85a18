//! Per-detail-view rating interaction.
//!
//! ```text
//! Unrated ──rate──▶ Rating(v) ──commit──▶ Committed
//!                   ▲      │
//!                   └─rate─┘
//! AlreadyRated(v)   (terminal; movie already on the watched list)
//! ```

use picturepulse_api::traits::MovieDetail;
use serde::Serialize;

use crate::error::PulseError;
use crate::models::WatchedEntry;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RatingState {
    Unrated,
    Rating(u8),
    Committed,
    /// The movie is already on the list with this rating; display only.
    AlreadyRated(u8),
}

/// Rating state for one open detail view.
#[derive(Debug, Clone)]
pub struct RatingSession {
    movie_id: String,
    state: RatingState,
    changes: u32,
}

impl RatingSession {
    /// Start a session for `movie_id`. `existing` is the watched entry for the
    /// movie, if there is one.
    pub fn open(movie_id: impl Into<String>, existing: Option<&WatchedEntry>) -> Self {
        let state = match existing {
            Some(entry) => RatingState::AlreadyRated(entry.user_rating),
            None => RatingState::Unrated,
        };
        Self {
            movie_id: movie_id.into(),
            state,
            changes: 0,
        }
    }

    pub fn movie_id(&self) -> &str {
        &self.movie_id
    }

    pub fn state(&self) -> RatingState {
        self.state
    }

    /// Number of times the picked value changed.
    pub fn changes(&self) -> u32 {
        self.changes
    }

    /// Re-derive the already-rated status from the movie's current watched
    /// entry. A committed session is left alone.
    pub fn refresh(&mut self, existing: Option<&WatchedEntry>) {
        match (self.state, existing) {
            (RatingState::Committed, _) => {}
            (_, Some(entry)) => self.state = RatingState::AlreadyRated(entry.user_rating),
            (RatingState::AlreadyRated(_), None) => {
                self.state = RatingState::Unrated;
                self.changes = 0;
            }
            (_, None) => {}
        }
    }

    /// Pick a star value.
    pub fn rate(&mut self, value: u8) -> Result<RatingState, PulseError> {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(PulseError::Rating(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {value}"
            )));
        }
        match self.state {
            RatingState::Unrated => {
                self.changes += 1;
            }
            RatingState::Rating(current) => {
                if current != value {
                    self.changes += 1;
                }
            }
            RatingState::Committed => {
                return Err(PulseError::Rating("rating already committed".into()));
            }
            RatingState::AlreadyRated(stored) => {
                return Err(PulseError::Rating(format!("movie already rated {stored}")));
            }
        }
        self.state = RatingState::Rating(value);
        tracing::debug!(id = %self.movie_id, value, changes = self.changes, "rating picked");
        Ok(self.state)
    }

    /// Confirm the picked value, producing the entry to add to the watched list.
    pub fn commit(&mut self, detail: &MovieDetail) -> Result<WatchedEntry, PulseError> {
        let user_rating = match self.state {
            RatingState::Rating(v) => v,
            RatingState::Unrated => {
                return Err(PulseError::Rating("pick a rating first".into()));
            }
            RatingState::Committed => {
                return Err(PulseError::Rating("rating already committed".into()));
            }
            RatingState::AlreadyRated(v) => {
                return Err(PulseError::Rating(format!("movie already rated {v}")));
            }
        };
        if detail.id != self.movie_id {
            return Err(PulseError::Rating(format!(
                "detail for {} does not match the rated movie {}",
                detail.id, self.movie_id
            )));
        }

        self.state = RatingState::Committed;
        Ok(WatchedEntry {
            id: self.movie_id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster: detail.poster.clone(),
            provider_rating: parse_provider_rating(&detail.provider_rating),
            user_rating,
            runtime_minutes: parse_runtime_minutes(&detail.runtime),
            rating_changes: self.changes,
        })
    }
}

/// Minutes from runtime text such as `"142 min"`. Unparseable text yields 0.
pub fn parse_runtime_minutes(runtime: &str) -> u32 {
    runtime
        .split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .unwrap_or(0)
}

/// Numeric provider rating such as `"8.7"`. `"N/A"` and garbage yield 0.
pub fn parse_provider_rating(rating: &str) -> f64 {
    rating
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
