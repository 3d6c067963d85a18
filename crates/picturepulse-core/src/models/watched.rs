use serde::{Deserialize, Deserializer, Serialize};

/// A user-rated movie, persisted in the watched list.
///
/// Field names on the wire match the browser app's `localStorage` layout so
/// existing exports load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedEntry {
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(rename = "imdbRating", default, deserialize_with = "null_as_default")]
    pub provider_rating: f64,
    #[serde(rename = "userRating", default, deserialize_with = "null_as_default")]
    pub user_rating: u8,
    /// Runtime in whole minutes; 0 when the provider had none.
    #[serde(rename = "runtime", default, deserialize_with = "null_as_default")]
    pub runtime_minutes: u32,
    /// How many times the rating was changed before committing. Analytics only.
    #[serde(rename = "userRatingDecisions", default, deserialize_with = "null_as_default")]
    pub rating_changes: u32,
}

/// `JSON.stringify(NaN)` writes `null`; read it back as zero.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Summary statistics over the watched list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Aggregates {
    pub count: usize,
    pub avg_provider_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime_minutes: f64,
}

impl Aggregates {
    /// Means over `entries`. An empty slice yields all zeros.
    pub fn from_entries(entries: &[WatchedEntry]) -> Self {
        Self {
            count: entries.len(),
            avg_provider_rating: mean(entries.iter().map(|e| e.provider_rating)),
            avg_user_rating: mean(entries.iter().map(|e| f64::from(e.user_rating))),
            avg_runtime_minutes: mean(entries.iter().map(|e| f64::from(e.runtime_minutes))),
        }
    }
}

/// Arithmetic mean; defined as 0 for no values.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, provider: f64, user: u8, runtime: u32) -> WatchedEntry {
        WatchedEntry {
            id: id.into(),
            title: format!("Movie {id}"),
            year: "2010".into(),
            poster: None,
            provider_rating: provider,
            user_rating: user,
            runtime_minutes: runtime,
            rating_changes: 1,
        }
    }

    #[test]
    fn test_empty_aggregates_are_zero() {
        let agg = Aggregates::from_entries(&[]);
        assert_eq!(agg, Aggregates::default());
        assert!(!agg.avg_user_rating.is_nan());
    }

    #[test]
    fn test_aggregates_means() {
        let entries = vec![entry("tt1", 8.0, 10, 148), entry("tt2", 7.0, 6, 90)];
        let agg = Aggregates::from_entries(&entries);
        assert_eq!(agg.count, 2);
        assert!((agg.avg_provider_rating - 7.5).abs() < 1e-9);
        assert!((agg.avg_user_rating - 8.0).abs() < 1e-9);
        assert!((agg.avg_runtime_minutes - 119.0).abs() < 1e-9);
    }

    #[test]
    fn test_deserialize_browser_layout() {
        let json = r#"{
            "imdbID": "tt1375666",
            "title": "Inception",
            "year": "2010",
            "poster": "https://m.media-amazon.com/images/M/inception.jpg",
            "imdbRating": 8.8,
            "userRating": 10,
            "runtime": 148,
            "userRatingDecisions": 3
        }"#;

        let e: WatchedEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.id, "tt1375666");
        assert_eq!(e.user_rating, 10);
        assert_eq!(e.runtime_minutes, 148);
        assert_eq!(e.rating_changes, 3);
    }

    #[test]
    fn test_deserialize_nan_written_as_null() {
        let json = r#"{"imdbID": "tt0000001", "title": "Lost", "imdbRating": null, "userRating": 5, "runtime": null}"#;

        let e: WatchedEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.provider_rating, 0.0);
        assert_eq!(e.runtime_minutes, 0);
        assert_eq!(e.rating_changes, 0);
    }
}
