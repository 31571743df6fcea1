//! Query debouncing.
//!
//! Coalesces rapid query edits so the index is searched once the user
//! pauses typing. Time is passed in by the caller, which keeps the
//! debouncer independent of any event loop.

use std::time::{Duration, Instant};

/// Default delay between the last keystroke and the search.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Query waiting to be released.
#[derive(Clone, Debug)]
struct PendingQuery {
    query: String,
    deadline: Instant,
}

/// Holds the latest query until it has been stable for the delay.
#[derive(Clone, Debug)]
pub struct QueryDebouncer {
    delay: Duration,
    pending: Option<PendingQuery>,
}

impl QueryDebouncer {
    /// Create a debouncer with the given delay.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record an edit. Replaces any pending query and restarts the delay.
    pub fn input(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(PendingQuery {
            query: query.into(),
            deadline: now + self.delay,
        });
    }

    /// Release the pending query if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.deadline <= now)
        {
            return self.pending.take().map(|pending| pending.query);
        }
        None
    }

    /// When the pending query becomes ready, if there is one.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Release the pending query immediately.
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|pending| pending.query)
    }

    /// Drop the pending query, e.g. when the overlay closes.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl Default for QueryDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
