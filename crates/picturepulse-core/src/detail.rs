//! Detail view state for the currently selected movie.
//!
//! Guarded by the same ticket scheme as search, so a slow response for a
//! previous selection can never overwrite the current one.

use picturepulse_api::traits::{FailureKind, MovieDetail};
use serde::Serialize;

use crate::fetch::{failure_message, Liveness, Operation, Ticket};

/// Display title while no detail view is open.
pub const APP_TITLE: &str = "PicturePulse";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailCommand {
    /// Start a detail request for `id` under `ticket`.
    Fetch { ticket: Ticket, id: String },
    /// The view was closed; any request was invalidated.
    Closed,
    /// Nothing changed.
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    Loaded,
    Failed,
    Stale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailSnapshot {
    pub selected: Option<String>,
    pub detail: Option<MovieDetail>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
pub struct DetailState {
    selected: Option<String>,
    detail: Option<MovieDetail>,
    error: Option<String>,
    liveness: Liveness,
}

impl DetailState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        self.detail.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.liveness.in_flight()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    /// Open the detail view for `id`, replacing any current selection.
    pub fn select(&mut self, id: impl Into<String>) -> DetailCommand {
        let id = id.into();
        if self.selected.as_deref() == Some(id.as_str()) {
            return DetailCommand::Unchanged;
        }
        if let Some(stale) = self.liveness.retire() {
            tracing::debug!(ticket = %stale, "detail request superseded");
        }
        self.detail = None;
        self.error = None;
        self.selected = Some(id.clone());

        let ticket = self.liveness.issue();
        tracing::debug!(%ticket, id, "detail requested");
        DetailCommand::Fetch { ticket, id }
    }

    /// Select `id`, or close the view if it is already selected.
    pub fn toggle(&mut self, id: impl Into<String>) -> DetailCommand {
        let id = id.into();
        if self.selected.as_deref() == Some(id.as_str()) {
            self.close()
        } else {
            self.select(id)
        }
    }

    /// Close the view and invalidate any outstanding request.
    pub fn close(&mut self) -> DetailCommand {
        if self.selected.is_none() {
            return DetailCommand::Unchanged;
        }
        self.liveness.retire();
        self.selected = None;
        self.detail = None;
        self.error = None;
        DetailCommand::Closed
    }

    pub fn finish(
        &mut self,
        ticket: Ticket,
        result: Result<MovieDetail, FailureKind>,
    ) -> DetailOutcome {
        if !self.liveness.settle(ticket) {
            tracing::debug!(%ticket, "discarding stale detail result");
            return DetailOutcome::Stale;
        }

        match result {
            Ok(detail) => {
                self.detail = Some(detail);
                self.error = None;
                DetailOutcome::Loaded
            }
            Err(kind) => {
                self.error = Some(failure_message(Operation::Detail, kind).to_string());
                DetailOutcome::Failed
            }
        }
    }

    /// Window/document title for the current state.
    pub fn title(&self) -> String {
        match &self.detail {
            Some(d) if self.is_open() && !d.title.is_empty() => format!("Movie | {}", d.title),
            _ => APP_TITLE.to_string(),
        }
    }

    pub fn snapshot(&self) -> DetailSnapshot {
        DetailSnapshot {
            selected: self.selected.clone(),
            detail: self.detail.clone(),
            loading: self.is_loading(),
            error: self.error.clone(),
        }
    }
}
