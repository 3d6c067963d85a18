//! Search coordinator state.
//!
//! A pure state machine: the runtime feeds it query changes and fetch results
//! and carries out the [`SearchCommand`]s it returns. It owns the results,
//! the loading flag and the error slot for the search box.

use picturepulse_api::traits::{FailureKind, MovieSummary};
use serde::Serialize;

use crate::fetch::{failure_message, Liveness, Operation, Ticket};

/// What the runtime must do after a query change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    /// Start a request for `query` under `ticket`.
    Fetch { ticket: Ticket, query: String },
    /// The query is below the threshold; results were cleared.
    Cleared,
    /// The query did not change; nothing to do.
    Unchanged,
}

/// How a fetch result was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results replaced. Any open detail view should close.
    Loaded { count: usize },
    /// Error slot set; previous results left in place.
    Failed,
    /// The ticket was superseded or cancelled; nothing changed.
    Stale,
}

/// Read-only view of the search slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSnapshot {
    pub query: String,
    pub results: Vec<MovieSummary>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct SearchState {
    query: String,
    results: Vec<MovieSummary>,
    error: Option<String>,
    liveness: Liveness,
    min_query_len: usize,
}

impl SearchState {
    pub fn new(min_query_len: usize) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            error: None,
            liveness: Liveness::default(),
            min_query_len,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[MovieSummary] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True strictly while a request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.liveness.in_flight()
    }

    /// Handle a new query value. Any in-flight request is invalidated first.
    pub fn set_query(&mut self, query: impl Into<String>) -> SearchCommand {
        let query = query.into();
        if query == self.query {
            return SearchCommand::Unchanged;
        }
        self.query = query;

        if let Some(stale) = self.liveness.retire() {
            tracing::debug!(ticket = %stale, "search superseded");
        }

        let trimmed = self.query.trim();
        if trimmed.chars().count() < self.min_query_len {
            self.results.clear();
            self.error = None;
            return SearchCommand::Cleared;
        }

        self.error = None;
        let ticket = self.liveness.issue();
        tracing::debug!(%ticket, query = trimmed, "search issued");
        SearchCommand::Fetch {
            ticket,
            query: trimmed.to_string(),
        }
    }

    /// Apply the result of the request issued under `ticket`.
    pub fn finish(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<MovieSummary>, FailureKind>,
    ) -> SearchOutcome {
        if !self.liveness.settle(ticket) {
            tracing::debug!(%ticket, "discarding stale search result");
            return SearchOutcome::Stale;
        }

        match result {
            Ok(results) => {
                let count = results.len();
                self.results = results;
                self.error = None;
                SearchOutcome::Loaded { count }
            }
            Err(kind) => {
                self.error = Some(failure_message(Operation::Search, kind).to_string());
                SearchOutcome::Failed
            }
        }
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            query: self.query.clone(),
            results: self.results.clone(),
            loading: self.is_loading(),
            error: self.error.clone(),
        }
    }
}
