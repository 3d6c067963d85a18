//! The watched list: an ordered, user-rated movie collection mirrored into
//! durable storage after every mutation.

use crate::models::{Aggregates, WatchedEntry};
use crate::storage::KeyValueStore;

/// Storage key holding the JSON-serialized list.
pub const WATCHED_KEY: &str = "watched";

/// Owns the canonical watched list and its durable mirror.
///
/// The in-memory list is authoritative for the session. Storage failures are
/// logged and otherwise ignored.
pub struct WatchedStore<S: KeyValueStore> {
    storage: S,
    entries: Vec<WatchedEntry>,
}

impl<S: KeyValueStore> WatchedStore<S> {
    /// Load the list from storage. Absent or unparsable data yields an empty list.
    pub fn load(storage: S) -> Self {
        let entries = match storage.get(WATCHED_KEY) {
            Ok(Some(raw)) => parse_entries(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read watched list, starting empty: {e}");
                Vec::new()
            }
        };
        tracing::debug!(count = entries.len(), "watched list loaded");
        Self { storage, entries }
    }

    /// Snapshot of the current list, in insertion order.
    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry with the given id.
    pub fn find(&self, id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Append an entry. Duplicate ids are accepted.
    pub fn add(&mut self, entry: WatchedEntry) {
        tracing::info!(id = %entry.id, title = %entry.title, rating = entry.user_rating, "added to watched list");
        self.entries.push(entry);
        self.flush();
    }

    /// Remove every entry with the given id, returning how many were removed.
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::info!(id, removed, "removed from watched list");
        }
        self.flush();
        removed
    }

    /// Recompute the summary statistics from the current list.
    pub fn aggregates(&self) -> Aggregates {
        Aggregates::from_entries(&self.entries)
    }

    /// Write the full list to storage. Fire-and-forget.
    fn flush(&self) {
        match serde_json::to_string(&self.entries) {
            Ok(json) => {
                if let Err(e) = self.storage.set(WATCHED_KEY, &json) {
                    tracing::warn!("Failed to persist watched list: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize watched list: {e}"),
        }
    }
}

/// Decode a stored list, skipping individual entries that do not parse.
fn parse_entries(raw: &str) -> Vec<WatchedEntry> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(serde_json::Value::Array(values)) => values,
        Ok(serde_json::Value::Null) => return Vec::new(),
        Ok(_) => {
            tracing::warn!("Stored watched list is not an array, starting empty");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!("Stored watched list is not valid JSON, starting empty: {e}");
            return Vec::new();
        }
    };

    values
        .into_iter()
        .filter_map(|v| match serde_json::from_value::<WatchedEntry>(v) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping malformed watched entry: {e}");
                None
            }
        })
        .collect()
}
