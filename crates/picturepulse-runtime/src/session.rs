//! The single-owner event loop.
//!
//! `Session` holds every piece of application state. Provider calls run as
//! spawned tasks that never touch state; they report back over a channel and
//! the session applies each result in turn. A result applies only if its
//! ticket is still live, and superseded tasks are aborted as well.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use picturepulse_api::traits::{
    FailureKind, MovieDetail, MovieProvider, MovieSummary, ProviderError,
};
use picturepulse_core::activity::{ActivityEntry, ActivityEvent, ActivityLog};
use picturepulse_core::config::SearchConfig;
use picturepulse_core::detail::{DetailCommand, DetailOutcome, DetailSnapshot, DetailState};
use picturepulse_core::fetch::Ticket;
use picturepulse_core::models::{Aggregates, WatchedEntry};
use picturepulse_core::rating::{RatingSession, RatingState};
use picturepulse_core::search::{SearchCommand, SearchOutcome, SearchSnapshot, SearchState};
use picturepulse_core::shortcuts::{Focus, Scope, ScopeGuard, Shortcut, ShortcutRegistry};
use picturepulse_core::storage::KeyValueStore;
use picturepulse_core::watched::WatchedStore;

use crate::RuntimeError;

/// Result of a finished fetch task, posted back to the session.
#[derive(Debug)]
enum FetchEvent {
    Search {
        ticket: Ticket,
        query: String,
        result: Result<Vec<MovieSummary>, FailureKind>,
    },
    Detail {
        ticket: Ticket,
        id: String,
        result: Result<MovieDetail, FailureKind>,
    },
}

/// What applying a fetch event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchUpdate {
    SearchLoaded { count: usize },
    SearchFailed,
    DetailLoaded,
    DetailFailed,
    /// A superseded or cancelled result was dropped.
    Stale,
}

struct InFlight {
    label: String,
    handle: JoinHandle<()>,
}

pub struct Session<P: MovieProvider, S: KeyValueStore> {
    provider: Arc<P>,
    search: SearchState,
    detail: DetailState,
    rating: Option<RatingSession>,
    watched: WatchedStore<S>,
    activity: ActivityLog,
    shortcuts: ShortcutRegistry,
    focus: Focus,
    _search_scope: ScopeGuard,
    detail_scope: Option<ScopeGuard>,
    events_tx: mpsc::UnboundedSender<FetchEvent>,
    events_rx: mpsc::UnboundedReceiver<FetchEvent>,
    search_task: Option<InFlight>,
    detail_task: Option<InFlight>,
}

impl<P: MovieProvider, S: KeyValueStore> Session<P, S> {
    /// Create a session. The watched list is loaded from `storage` here; the
    /// query input starts focused.
    pub fn new(provider: P, storage: S, config: &SearchConfig) -> Self {
        let shortcuts = ShortcutRegistry::new();
        let search_scope = shortcuts.register(Scope::Search);
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            provider: Arc::new(provider),
            search: SearchState::new(config.min_query_len),
            detail: DetailState::new(),
            rating: None,
            watched: WatchedStore::load(storage),
            activity: ActivityLog::new(),
            shortcuts,
            focus: Focus::SearchInput,
            _search_scope: search_scope,
            detail_scope: None,
            events_tx,
            events_rx,
            search_task: None,
            detail_task: None,
        }
    }

    // ── Search ──────────────────────────────────────────────────

    /// Change the query. Cancels any in-flight search and, if the query is
    /// long enough, starts a new one.
    pub fn set_query(&mut self, query: impl Into<String>) -> SearchCommand {
        let was_loading = self.search.is_loading();
        let command = self.search.set_query(query);
        if command == SearchCommand::Unchanged {
            return command;
        }

        if let Some(task) = self.search_task.take() {
            task.handle.abort();
            if was_loading {
                self.activity
                    .push(ActivityEvent::SearchDiscarded { query: task.label });
            }
        }

        if let SearchCommand::Fetch { ticket, query } = &command {
            self.activity.push(ActivityEvent::SearchIssued {
                query: query.clone(),
            });
            self.spawn_search(*ticket, query.clone());
        }
        command
    }

    fn spawn_search(&mut self, ticket: Ticket, query: String) {
        let provider = Arc::clone(&self.provider);
        let tx = self.events_tx.clone();
        let label = query.clone();
        let handle = tokio::spawn(async move {
            let result = provider.search_movies(&query).await.map_err(|e| {
                tracing::warn!(query = %query, "search failed: {e}");
                e.kind()
            });
            let _ = tx.send(FetchEvent::Search {
                ticket,
                query,
                result,
            });
        });
        self.search_task = Some(InFlight { label, handle });
    }

    pub fn search(&self) -> SearchSnapshot {
        self.search.snapshot()
    }

    pub fn results(&self) -> &[MovieSummary] {
        self.search.results()
    }

    // ── Detail ──────────────────────────────────────────────────

    /// Open the detail view for `id`; selecting the open movie again closes it.
    pub fn select(&mut self, id: impl Into<String>) -> DetailCommand {
        let previous = self.detail.selected().map(str::to_owned);
        let command = self.detail.toggle(id);

        match &command {
            DetailCommand::Fetch { ticket, id } => {
                if let Some(task) = self.detail_task.take() {
                    task.handle.abort();
                }
                self.rating = Some(RatingSession::open(id.clone(), self.watched.find(id)));
                if self.detail_scope.is_none() {
                    self.detail_scope = Some(self.shortcuts.register(Scope::Detail));
                }
                self.activity
                    .push(ActivityEvent::DetailOpened { id: id.clone() });
                self.spawn_detail(*ticket, id.clone());
            }
            DetailCommand::Closed => self.on_detail_closed(previous),
            DetailCommand::Unchanged => {}
        }
        command
    }

    /// Select the `index`-th current search result.
    pub fn select_result(&mut self, index: usize) -> Result<DetailCommand, RuntimeError> {
        let id = self
            .search
            .results()
            .get(index)
            .map(|m| m.id.clone())
            .ok_or_else(|| RuntimeError::NotFound(format!("no search result #{}", index + 1)))?;
        Ok(self.select(id))
    }

    /// Close the detail view, if open.
    pub fn close_detail(&mut self) -> bool {
        let previous = self.detail.selected().map(str::to_owned);
        if self.detail.close() == DetailCommand::Closed {
            self.on_detail_closed(previous);
            true
        } else {
            false
        }
    }

    fn on_detail_closed(&mut self, previous: Option<String>) {
        if let Some(task) = self.detail_task.take() {
            task.handle.abort();
        }
        self.rating = None;
        self.detail_scope = None;
        if let Some(id) = previous {
            self.activity.push(ActivityEvent::DetailClosed { id });
        }
    }

    fn spawn_detail(&mut self, ticket: Ticket, id: String) {
        let provider = Arc::clone(&self.provider);
        let tx = self.events_tx.clone();
        let label = id.clone();
        let handle = tokio::spawn(async move {
            let result = provider.movie_detail(&id).await.map_err(|e| {
                tracing::warn!(id = %id, "detail fetch failed: {e}");
                e.kind()
            });
            let _ = tx.send(FetchEvent::Detail { ticket, id, result });
        });
        self.detail_task = Some(InFlight { label, handle });
    }

    pub fn detail(&self) -> DetailSnapshot {
        self.detail.snapshot()
    }

    /// Window title: `Movie | <title>` while a detail is shown.
    pub fn title(&self) -> String {
        self.detail.title()
    }

    // ── Rating ──────────────────────────────────────────────────

    pub fn rating(&self) -> Option<RatingState> {
        self.rating.as_ref().map(RatingSession::state)
    }

    /// Pick a star value for the open movie.
    pub fn rate(&mut self, value: u8) -> Result<RatingState, RuntimeError> {
        let rating = self
            .rating
            .as_mut()
            .ok_or_else(|| RuntimeError::NotFound("no movie is open".into()))?;
        Ok(rating.rate(value)?)
    }

    /// Commit the picked rating: add the open movie to the watched list and
    /// close the detail view.
    pub fn add_to_watched(&mut self) -> Result<WatchedEntry, RuntimeError> {
        let detail = self
            .detail
            .detail()
            .cloned()
            .ok_or_else(|| RuntimeError::NotFound("movie details are not loaded".into()))?;
        let rating = self
            .rating
            .as_mut()
            .ok_or_else(|| RuntimeError::NotFound("no movie is open".into()))?;

        let entry = rating.commit(&detail)?;
        self.watched.add(entry.clone());
        self.activity.push(ActivityEvent::WatchedAdded {
            id: entry.id.clone(),
            user_rating: entry.user_rating,
            rating_changes: entry.rating_changes,
        });
        self.close_detail();
        Ok(entry)
    }

    // ── Watched list ────────────────────────────────────────────

    pub fn watched(&self) -> &[WatchedEntry] {
        self.watched.entries()
    }

    pub fn aggregates(&self) -> Aggregates {
        self.watched.aggregates()
    }

    /// Remove every watched entry with `id`. Returns how many were removed.
    pub fn remove_watched(&mut self, id: &str) -> usize {
        let removed = self.watched.remove(id);
        self.refresh_rating();
        self.activity.push(ActivityEvent::WatchedRemoved {
            id: id.to_string(),
            removed,
        });
        removed
    }

    /// Recompute the open movie's rating state against the watched list.
    fn refresh_rating(&mut self) {
        if let Some(rating) = self.rating.as_mut() {
            rating.refresh(self.watched.find(rating.movie_id()));
        }
    }

    // ── Keyboard ────────────────────────────────────────────────

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    /// Handle a global key press, applying the shortcut it maps to.
    pub fn press_key(&mut self, key: &str) -> Option<Shortcut> {
        let shortcut = self.shortcuts.dispatch(key, self.focus)?;
        match shortcut {
            Shortcut::FocusSearch => {
                self.focus = Focus::SearchInput;
                self.set_query(String::new());
            }
            Shortcut::CloseDetail => {
                self.close_detail();
            }
        }
        Some(shortcut)
    }

    // ── Event loop ──────────────────────────────────────────────

    /// Whether any request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.search.is_loading() || self.detail.is_loading()
    }

    /// Wait for the next fetch result and apply it.
    pub async fn next_update(&mut self) -> Option<FetchUpdate> {
        let event = self.events_rx.recv().await?;
        Some(self.apply(event))
    }

    /// Apply results until no request is outstanding.
    pub async fn settle(&mut self) {
        while self.is_busy() {
            if self.next_update().await.is_none() {
                break;
            }
        }
    }

    fn apply(&mut self, event: FetchEvent) -> FetchUpdate {
        match event {
            FetchEvent::Search {
                ticket,
                query,
                result,
            } => match self.search.finish(ticket, result) {
                SearchOutcome::Loaded { count } => {
                    self.search_task = None;
                    // A fresh result list makes any open detail stale.
                    self.close_detail();
                    self.activity
                        .push(ActivityEvent::SearchLoaded { query, count });
                    FetchUpdate::SearchLoaded { count }
                }
                SearchOutcome::Failed => {
                    self.search_task = None;
                    let message = self.search.error().unwrap_or_default().to_string();
                    self.activity
                        .push(ActivityEvent::SearchFailed { query, message });
                    FetchUpdate::SearchFailed
                }
                SearchOutcome::Stale => FetchUpdate::Stale,
            },
            FetchEvent::Detail { ticket, id, result } => {
                match self.detail.finish(ticket, result) {
                    DetailOutcome::Loaded => {
                        self.detail_task = None;
                        FetchUpdate::DetailLoaded
                    }
                    DetailOutcome::Failed => {
                        self.detail_task = None;
                        let message = self.detail.error().unwrap_or_default().to_string();
                        self.activity
                            .push(ActivityEvent::DetailFailed { id, message });
                        FetchUpdate::DetailFailed
                    }
                    DetailOutcome::Stale => FetchUpdate::Stale,
                }
            }
        }
    }

    pub fn activity(&self) -> Vec<ActivityEntry> {
        self.activity.snapshot()
    }
}

impl<P: MovieProvider, S: KeyValueStore> Drop for Session<P, S> {
    fn drop(&mut self) {
        for task in [self.search_task.take(), self.detail_task.take()]
            .into_iter()
            .flatten()
        {
            task.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use std::time::Duration;

    use picturepulse_core::storage::Storage;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("fake provider failure: {0:?}")]
    struct FakeError(FailureKind);

    impl ProviderError for FakeError {
        fn kind(&self) -> FailureKind {
            self.0
        }
    }

    /// In-process provider with per-key latency and failures.
    #[derive(Default)]
    struct FakeProvider {
        delays: HashMap<String, Duration>,
        failures: HashMap<String, FailureKind>,
        empty: HashSet<String>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn delay(mut self, key: &str, ms: u64) -> Self {
            self.delays.insert(key.into(), Duration::from_millis(ms));
            self
        }

        fn fail(mut self, key: &str, kind: FailureKind) -> Self {
            self.failures.insert(key.into(), kind);
            self
        }

        async fn respond(&self, key: &str) -> Result<(), FakeError> {
            self.calls.lock().unwrap().push(key.to_string());
            let delay = self
                .delays
                .get(key)
                .copied()
                .unwrap_or(Duration::from_millis(5));
            tokio::time::sleep(delay).await;
            match self.failures.get(key) {
                Some(kind) => Err(FakeError(*kind)),
                None => Ok(()),
            }
        }
    }

    impl MovieProvider for FakeProvider {
        type Error = FakeError;

        async fn search_movies(&self, query: &str) -> Result<Vec<MovieSummary>, FakeError> {
            self.respond(query).await?;
            if self.empty.contains(query) {
                return Ok(Vec::new());
            }
            Ok(vec![MovieSummary {
                id: format!("id-{query}"),
                title: query.to_string(),
                year: "1999".into(),
                poster: None,
            }])
        }

        async fn movie_detail(&self, id: &str) -> Result<MovieDetail, FakeError> {
            self.respond(id).await?;
            Ok(MovieDetail {
                id: id.to_string(),
                title: format!("Movie {id}"),
                year: "1999".into(),
                poster: None,
                runtime: "136 min".into(),
                provider_rating: "8.7".into(),
                plot: "A hacker learns the truth.".into(),
                released: "31 Mar 1999".into(),
                actors: "Keanu Reeves".into(),
                director: "The Wachowskis".into(),
                genre: "Action, Sci-Fi".into(),
            })
        }
    }

    fn session(provider: FakeProvider) -> Session<FakeProvider, Storage> {
        Session::new(
            provider,
            Storage::open_memory().unwrap(),
            &SearchConfig {
                min_query_len: 3,
                initial_query: String::new(),
            },
        )
    }

    fn calls(s: &Session<FakeProvider, Storage>) -> Vec<String> {
        s.provider.calls.lock().unwrap().clone()
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_makes_no_call() {
        let mut s = session(FakeProvider::default());
        assert_eq!(s.set_query("ab"), SearchCommand::Cleared);
        tokio::time::sleep(Duration::from_millis(50)).await;
        s.settle().await;

        let snap = s.search();
        assert!(snap.results.is_empty());
        assert!(!snap.loading);
        assert!(snap.error.is_none());
        assert!(calls(&s).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_loads_results() {
        let mut s = session(FakeProvider::default());
        s.set_query("matrix");
        assert!(s.search().loading);

        assert_eq!(
            s.next_update().await,
            Some(FetchUpdate::SearchLoaded { count: 1 })
        );
        let snap = s.search();
        assert!(!snap.loading);
        assert_eq!(snap.results[0].id, "id-matrix");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_in_channel_is_discarded() {
        let provider = FakeProvider::default()
            .delay("mat", 10)
            .delay("matrix", 50);
        let mut s = session(provider);

        s.set_query("mat");
        // Let the first request complete and queue its result unprocessed.
        tokio::time::sleep(Duration::from_millis(20)).await;
        s.set_query("matrix");

        assert_eq!(s.next_update().await, Some(FetchUpdate::Stale));
        assert!(s.search().loading);
        assert_eq!(
            s.next_update().await,
            Some(FetchUpdate::SearchLoaded { count: 1 })
        );
        assert_eq!(s.results()[0].title, "matrix");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_only_final_query_applies() {
        let provider = FakeProvider::default()
            .delay("mat", 300)
            .delay("matr", 200)
            .delay("matri", 100)
            .delay("matrix", 10);
        let mut s = session(provider);

        for q in ["m", "ma", "mat", "matr", "matri", "matrix"] {
            s.set_query(q);
            tokio::task::yield_now().await;
        }
        s.settle().await;
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(s.results().len(), 1);
        assert_eq!(s.results()[0].title, "matrix");
        assert!(!s.search().loading);
        assert!(s.search().error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_via_short_query_sets_no_error() {
        let provider = FakeProvider::default()
            .delay("matrix", 100)
            .fail("matrix", FailureKind::Transport);
        let mut s = session(provider);

        s.set_query("matrix");
        s.set_query("ma");
        tokio::time::sleep(Duration::from_millis(200)).await;
        s.settle().await;

        let snap = s.search();
        assert!(!snap.loading);
        assert!(snap.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_found_sets_error_and_keeps_results() {
        let provider = FakeProvider::default().fail("matrix", FailureKind::NotFound);
        let mut s = session(provider);

        s.set_query("inception");
        s.settle().await;
        s.set_query("matrix");
        assert_eq!(s.next_update().await, Some(FetchUpdate::SearchFailed));

        let snap = s.search();
        assert_eq!(snap.error.as_deref(), Some("movies not found"));
        assert!(!snap.loading);
        assert_eq!(snap.results.len(), 1);
        assert_eq!(snap.results[0].title, "inception");
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_search_closes_detail() {
        let mut s = session(FakeProvider::default());
        s.select("tt0133093");
        s.settle().await;
        assert!(s.detail().detail.is_some());

        s.set_query("inception");
        s.settle().await;
        assert!(s.detail().selected.is_none());
        assert!(s.rating().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_and_add_scenario() {
        let mut s = session(FakeProvider::default());
        s.select("tt0133093");
        s.settle().await;
        assert_eq!(s.title(), "Movie | Movie tt0133093");
        assert_eq!(s.rating(), Some(RatingState::Unrated));

        s.rate(8).unwrap();
        let entry = s.add_to_watched().unwrap();

        assert_eq!(entry.runtime_minutes, 136);
        assert_eq!(entry.user_rating, 8);
        assert_eq!(s.watched().len(), 1);
        assert!(s.detail().selected.is_none());
        assert_eq!(s.title(), "PicturePulse");
        // Escape listener is gone with the detail view.
        assert_eq!(s.press_key("Escape"), None);

        // Reopening shows the stored rating.
        s.select("tt0133093");
        assert_eq!(s.rating(), Some(RatingState::AlreadyRated(8)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_then_remove_restores_length() {
        let mut s = session(FakeProvider::default());
        let before = s.aggregates();

        s.select("tt1");
        s.settle().await;
        s.rate(6).unwrap();
        s.add_to_watched().unwrap();
        assert_eq!(s.aggregates().count, 1);

        assert_eq!(s.remove_watched("tt1"), 1);
        assert_eq!(s.remove_watched("tt1"), 0);
        assert_eq!(s.watched().len(), 0);
        assert_eq!(s.aggregates(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_removing_open_movie_reopens_rating() {
        let mut s = session(FakeProvider::default());
        s.select("tt1");
        s.settle().await;
        s.rate(8).unwrap();
        s.add_to_watched().unwrap();

        s.select("tt1");
        s.settle().await;
        assert_eq!(s.rating(), Some(RatingState::AlreadyRated(8)));

        assert_eq!(s.remove_watched("tt1"), 1);
        assert!(s.watched().is_empty());
        assert_eq!(s.rating(), Some(RatingState::Unrated));

        assert_eq!(s.rate(5).unwrap(), RatingState::Rating(5));
        let entry = s.add_to_watched().unwrap();
        assert_eq!(entry.user_rating, 5);
        assert_eq!(entry.rating_changes, 1);
        assert_eq!(s.watched().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_removing_other_movie_keeps_rating() {
        let mut s = session(FakeProvider::default());
        s.select("tt1");
        s.settle().await;
        s.rate(7).unwrap();

        s.remove_watched("tt2");
        assert_eq!(s.rating(), Some(RatingState::Rating(7)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_detail_selection_wins() {
        let provider = FakeProvider::default().delay("tt1", 10).delay("tt2", 50);
        let mut s = session(provider);

        s.select("tt1");
        tokio::time::sleep(Duration::from_millis(20)).await;
        s.select("tt2");
        s.settle().await;

        let snap = s.detail();
        assert_eq!(snap.selected.as_deref(), Some("tt2"));
        assert_eq!(snap.detail.map(|d| d.id), Some("tt2".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_detail_failure_is_independent_of_search_error() {
        let provider = FakeProvider::default().fail("tt404", FailureKind::Status(500));
        let mut s = session(provider);

        s.set_query("matrix");
        s.settle().await;
        s.select("tt404");
        assert_eq!(s.next_update().await, Some(FetchUpdate::DetailFailed));

        assert!(s.detail().error.is_some());
        assert!(s.search().error.is_none());
        assert!(s.add_to_watched().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_twice_toggles_closed() {
        let mut s = session(FakeProvider::default());
        s.select("tt1");
        assert_eq!(s.select("tt1"), DetailCommand::Closed);
        assert!(!s.is_busy());
        assert!(s.rating().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyboard_shortcuts() {
        let mut s = session(FakeProvider::default());
        s.set_query("matrix");
        s.settle().await;

        // Enter does nothing while the input has focus.
        assert_eq!(s.press_key("Enter"), None);

        s.set_focus(Focus::Elsewhere);
        assert_eq!(s.press_key("Enter"), Some(Shortcut::FocusSearch));
        assert_eq!(s.focus(), Focus::SearchInput);
        assert_eq!(s.search().query, "");
        assert!(s.results().is_empty());

        s.select("tt1");
        assert_eq!(s.press_key("Escape"), Some(Shortcut::CloseDetail));
        assert!(s.detail().selected.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_watched_list_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pp.db");
        let config = SearchConfig {
            min_query_len: 3,
            initial_query: String::new(),
        };

        {
            let mut s = Session::new(
                FakeProvider::default(),
                Storage::open(&path).unwrap(),
                &config,
            );
            s.select("tt0133093");
            s.settle().await;
            s.rate(9).unwrap();
            s.add_to_watched().unwrap();
        }

        let s = Session::new(
            FakeProvider::default(),
            Storage::open(&path).unwrap(),
            &config,
        );
        assert_eq!(s.watched().len(), 1);
        assert_eq!(s.watched()[0].user_rating, 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_activity_records_discarded_search() {
        let provider = FakeProvider::default().delay("matrix", 100);
        let mut s = session(provider);
        s.set_query("matrix");
        s.set_query("");
        let events: Vec<ActivityEvent> = s.activity().into_iter().map(|(_, e)| e).collect();
        assert!(events.contains(&ActivityEvent::SearchDiscarded {
            query: "matrix".into()
        }));
    }
}
