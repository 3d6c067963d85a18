use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// Maximum number of events retained in the ring buffer.
const ACTIVITY_LOG_CAPACITY: usize = 200;

/// A notable user or network event, kept for the session's activity view.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityEvent {
    SearchIssued {
        query: String,
    },
    SearchLoaded {
        query: String,
        count: usize,
    },
    SearchFailed {
        query: String,
        message: String,
    },
    /// A request was cancelled or its late result discarded.
    SearchDiscarded {
        query: String,
    },
    DetailOpened {
        id: String,
    },
    DetailFailed {
        id: String,
        message: String,
    },
    DetailClosed {
        id: String,
    },
    WatchedAdded {
        id: String,
        user_rating: u8,
        rating_changes: u32,
    },
    WatchedRemoved {
        id: String,
        removed: usize,
    },
}

impl std::fmt::Display for ActivityEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SearchIssued { query } => write!(f, "search \"{query}\""),
            Self::SearchLoaded { query, count } => {
                write!(f, "search \"{query}\" -> {count} results")
            }
            Self::SearchFailed { query, message } => {
                write!(f, "search \"{query}\" failed: {message}")
            }
            Self::SearchDiscarded { query } => write!(f, "search \"{query}\" discarded"),
            Self::DetailOpened { id } => write!(f, "opened {id}"),
            Self::DetailFailed { id, message } => write!(f, "detail {id} failed: {message}"),
            Self::DetailClosed { id } => write!(f, "closed {id}"),
            Self::WatchedAdded {
                id,
                user_rating,
                rating_changes,
            } => write!(
                f,
                "added {id} rated {user_rating} after {rating_changes} change(s)"
            ),
            Self::WatchedRemoved { id, removed } => write!(f, "removed {id} ({removed})"),
        }
    }
}

/// A timestamped event entry.
pub type ActivityEntry = (DateTime<Utc>, ActivityEvent);

/// Bounded ring buffer of activity events.
#[derive(Debug)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(ACTIVITY_LOG_CAPACITY),
        }
    }

    /// Push a new event, evicting the oldest if at capacity.
    pub fn push(&mut self, event: ActivityEvent) {
        if self.entries.len() >= ACTIVITY_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back((Utc::now(), event));
    }

    /// Return a snapshot of all entries (newest last).
    pub fn snapshot(&self) -> Vec<ActivityEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
