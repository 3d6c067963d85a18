//! Liveness tracking for in-flight provider requests.
//!
//! Every request is issued a [`Ticket`]. Only the live ticket of a slot may
//! apply its result; anything else arriving later is stale and dropped,
//! whatever order the I/O completes in.

use picturepulse_api::traits::FailureKind;

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// At most one live ticket per slot.
#[derive(Debug, Default)]
pub struct Liveness {
    issued: u64,
    live: Option<Ticket>,
}

impl Liveness {
    /// Issue a fresh ticket, superseding any live one.
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.live = Some(ticket);
        ticket
    }

    /// Drop the live ticket without settling it. Returns it if there was one.
    pub fn retire(&mut self) -> Option<Ticket> {
        self.live.take()
    }

    /// Settle `ticket` if it is live. Returns `false` for stale tickets.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if self.live == Some(ticket) {
            self.live = None;
            true
        } else {
            false
        }
    }

    /// Whether a request is outstanding.
    pub fn in_flight(&self) -> bool {
        self.live.is_some()
    }
}

/// Which fetch slot a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Search,
    Detail,
}

/// The user-visible message for a failed fetch.
pub fn failure_message(op: Operation, kind: FailureKind) -> &'static str {
    match (op, kind) {
        (_, FailureKind::Transport) => "Failed to reach the movie database",
        (_, FailureKind::Malformed) => "Received an unreadable response from the movie database",
        (Operation::Search, FailureKind::Status(_)) => "Something went wrong with fetching movies",
        (Operation::Search, FailureKind::NotFound) => "movies not found",
        (Operation::Detail, FailureKind::Status(_)) => {
            "something went wrong while fetching movies details"
        }
        (Operation::Detail, FailureKind::NotFound) => "movie details not found",
    }
}
