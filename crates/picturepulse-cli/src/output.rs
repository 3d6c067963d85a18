//! Terminal rendering. Everything here is a pure function of session
//! snapshots; nothing reads or mutates state.

use std::fmt::Write as _;

use serde::Serialize;

use picturepulse_core::detail::DetailSnapshot;
use picturepulse_core::models::{Aggregates, WatchedEntry};
use picturepulse_core::rating::{RatingState, MAX_RATING};
use picturepulse_core::search::SearchSnapshot;

pub struct Output {
    json: bool,
    quiet: bool,
}

impl Output {
    pub fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }

    /// Human text, or `value` as JSON in `--json` mode.
    pub fn emit<T: Serialize>(&self, human: &str, value: &T) {
        if self.json {
            match serde_json::to_string_pretty(value) {
                Ok(s) => println!("{s}"),
                Err(e) => tracing::error!("failed to serialize output: {e}"),
            }
        } else {
            print!("{human}");
        }
    }

    /// A status line; suppressed by `--quiet` and in JSON mode.
    pub fn info(&self, msg: impl AsRef<str>) {
        if !self.quiet && !self.json {
            println!("{}", msg.as_ref());
        }
    }
}

pub fn search(snap: &SearchSnapshot) -> String {
    let mut out = String::new();
    if snap.loading {
        let _ = writeln!(out, "Loading...");
    }
    if let Some(error) = &snap.error {
        let _ = writeln!(out, "error: {error}");
    }
    if !snap.results.is_empty() {
        let _ = writeln!(out, "Found {} results", snap.results.len());
        for (i, movie) in snap.results.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}. {} ({})  [{}]",
                i + 1,
                movie.title,
                movie.year,
                movie.id
            );
        }
    }
    out
}

pub fn detail(snap: &DetailSnapshot, rating: Option<RatingState>) -> String {
    let mut out = String::new();
    if snap.loading {
        let _ = writeln!(out, "Loading...");
    }
    if let Some(error) = &snap.error {
        let _ = writeln!(out, "error: {error}");
    }
    let Some(d) = &snap.detail else {
        return out;
    };

    let _ = writeln!(out, "{} ({})  [{}]", d.title, d.year, d.id);
    let _ = writeln!(out, "{} | {}", d.released, d.runtime);
    let _ = writeln!(out, "{}", d.genre);
    let _ = writeln!(out, "IMDb rating: {}", d.provider_rating);
    if let Some(poster) = &d.poster {
        let _ = writeln!(out, "Poster: {poster}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", d.plot);
    let _ = writeln!(out, "Starring {}", d.actors);
    let _ = writeln!(out, "Directed by {}", d.director);

    if let Some(state) = rating {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", rating_line(state));
    }
    out
}

pub fn rating_line(state: RatingState) -> String {
    match state {
        RatingState::Unrated => format!("Your rating: {}", stars(0)),
        RatingState::Rating(v) => format!("Your rating: {} {v}/{MAX_RATING}", stars(v)),
        RatingState::Committed => "Added to your watched list".to_string(),
        RatingState::AlreadyRated(v) => format!("You rated this movie {v} \u{2b50}"),
    }
}

fn stars(value: u8) -> String {
    (1..=MAX_RATING)
        .map(|i| if i <= value { '\u{2605}' } else { '\u{2606}' })
        .collect()
}

pub fn summary(agg: &Aggregates) -> String {
    format!(
        "{} movies watched | \u{2b50} {:.2} IMDb | \u{1f31f} {:.2} yours | \u{23f3} {} min avg\n",
        agg.count,
        agg.avg_provider_rating,
        agg.avg_user_rating,
        agg.avg_runtime_minutes.floor(),
    )
}

pub fn watched(entries: &[WatchedEntry], agg: &Aggregates) -> String {
    let mut out = summary(agg);
    for entry in entries {
        let _ = writeln!(
            out,
            "  {} ({})  [{}]  \u{2b50} {:.1}  \u{1f31f} {}  \u{23f3} {} min",
            entry.title,
            entry.year,
            entry.id,
            entry.provider_rating,
            entry.user_rating,
            entry.runtime_minutes
        );
    }
    out
}

#[derive(Serialize)]
pub struct WatchedReport<'a> {
    pub summary: Aggregates,
    pub watched: &'a [WatchedEntry],
}

#[cfg(test)]
mod tests {
    use super::*;
    use picturepulse_api::traits::MovieSummary;

    fn entry(runtime: u32, rating: f64) -> WatchedEntry {
        WatchedEntry {
            id: "tt1".into(),
            title: "Heat".into(),
            year: "1995".into(),
            poster: None,
            provider_rating: rating,
            user_rating: 7,
            runtime_minutes: runtime,
            rating_changes: 1,
        }
    }

    #[test]
    fn test_summary_formats_two_decimals_and_floors_runtime() {
        let entries = vec![entry(170, 8.3), entry(121, 7.6)];
        let agg = Aggregates::from_entries(&entries);
        assert_eq!(
            summary(&agg),
            "2 movies watched | \u{2b50} 7.95 IMDb | \u{1f31f} 7.00 yours | \u{23f3} 145 min avg\n"
        );
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let out = summary(&Aggregates::default());
        assert!(out.starts_with("0 movies watched"));
        assert!(out.contains("0.00 IMDb"));
        assert!(out.contains("0 min avg"));
    }

    #[test]
    fn test_search_lists_results() {
        let snap = SearchSnapshot {
            query: "heat".into(),
            results: vec![MovieSummary {
                id: "tt0113277".into(),
                title: "Heat".into(),
                year: "1995".into(),
                poster: None,
            }],
            loading: false,
            error: None,
        };
        let out = search(&snap);
        assert!(out.starts_with("Found 1 results\n"));
        assert!(out.contains("1. Heat (1995)  [tt0113277]"));
    }

    #[test]
    fn test_rating_line() {
        assert_eq!(
            rating_line(RatingState::Rating(3)),
            "Your rating: \u{2605}\u{2605}\u{2605}\u{2606}\u{2606}\u{2606}\u{2606}\u{2606}\u{2606}\u{2606} 3/10"
        );
        assert!(rating_line(RatingState::AlreadyRated(9)).contains("rated this movie 9"));
    }
}
