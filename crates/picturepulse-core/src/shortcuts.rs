//! Global keyboard shortcuts with scoped registration.
//!
//! A listener is live exactly as long as its [`ScopeGuard`] exists:
//! the search scope for the whole session, the detail scope while a detail
//! view is open.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Where a listener is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Search,
    Detail,
}

impl Scope {
    fn index(self) -> usize {
        match self {
            Self::Search => 0,
            Self::Detail => 1,
        }
    }
}

/// Semantic action produced by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Enter while the query input is unfocused: focus it and clear the query.
    FocusSearch,
    /// Escape: close the open detail view.
    CloseDetail,
}

/// Which element currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    SearchInput,
    Elsewhere,
}

/// Tracks live listener registrations per scope.
#[derive(Debug, Clone, Default)]
pub struct ShortcutRegistry {
    active: Arc<[AtomicUsize; 2]>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `scope`. It stays registered until the guard drops.
    #[must_use = "the listener is released when the guard is dropped"]
    pub fn register(&self, scope: Scope) -> ScopeGuard {
        self.active[scope.index()].fetch_add(1, Ordering::Relaxed);
        tracing::trace!(?scope, "shortcut listener registered");
        ScopeGuard {
            active: Arc::clone(&self.active),
            scope,
        }
    }

    pub fn is_active(&self, scope: Scope) -> bool {
        self.active[scope.index()].load(Ordering::Relaxed) > 0
    }

    /// Map a key name (matched case-insensitively) to a shortcut, if a
    /// listener for it is registered.
    pub fn dispatch(&self, key: &str, focus: Focus) -> Option<Shortcut> {
        let key = key.trim();
        if key.eq_ignore_ascii_case("escape") && self.is_active(Scope::Detail) {
            Some(Shortcut::CloseDetail)
        } else if key.eq_ignore_ascii_case("enter")
            && focus != Focus::SearchInput
            && self.is_active(Scope::Search)
        {
            Some(Shortcut::FocusSearch)
        } else {
            None
        }
    }
}

/// Releases its listener registration on drop.
#[derive(Debug)]
pub struct ScopeGuard {
    active: Arc<[AtomicUsize; 2]>,
    scope: Scope,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.active[self.scope.index()].fetch_sub(1, Ordering::Relaxed);
        tracing::trace!(scope = ?self.scope, "shortcut listener released");
    }
}
