//! The canonical query state holder.
//!
//! [`QueryStore`] is the only mutator of the query state. Every change
//! recomputes the canonical representation, records a navigation history
//! entry and publishes [`Signal::QueryChanged`] with the full new state.

use std::sync::Arc;

use marquee_core::{QueryPatch, QueryState};
use marquee_events::{EventBus, Signal};

/// Oldest history entries are dropped beyond this many.
pub const MAX_HISTORY: usize = 100;

pub struct QueryStore {
    history: Vec<QueryState>,
    cursor: usize,
    canonical: String,
    bus: Arc<EventBus>,
}

impl QueryStore {
    /// Initialise from an externally supplied canonical representation
    /// (e.g. the address the app was opened with). Does not notify.
    pub fn init(location: &str, bus: Arc<EventBus>) -> Self {
        let state = QueryState::from_query_string(location);
        let canonical = state.to_query_string();
        Self {
            history: vec![state],
            cursor: 0,
            canonical,
            bus,
        }
    }

    /// Current state snapshot.
    pub fn get(&self) -> &QueryState {
        &self.history[self.cursor]
    }

    /// Canonical representation of the current state.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Merge `patch` over the current state. Notifies only when the result
    /// differs; returns whether it did.
    pub fn set(&mut self, patch: &QueryPatch) -> bool {
        let next = self.get().apply(patch);
        if next == *self.get() {
            return false;
        }
        self.push(next);
        self.notify();
        true
    }

    /// Return every field to its default and notify.
    pub fn reset(&mut self) {
        let default = QueryState::default();
        if *self.get() != default {
            self.push(default);
        }
        self.notify();
    }

    /// Load an external representation (address bar navigation). Malformed
    /// values degrade to defaults. Always notifies once.
    pub fn navigate(&mut self, location: &str) {
        let next = QueryState::from_query_string(location);
        if next != *self.get() {
            self.push(next);
        }
        self.notify();
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    /// Step back through history. Notifies when the cursor moved.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.cursor -= 1;
        self.notify();
        true
    }

    /// Step forward through history. Notifies when the cursor moved.
    pub fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.cursor += 1;
        self.notify();
        true
    }

    // ---- private helpers ----

    /// Append a new entry after the cursor, discarding forward entries.
    fn push(&mut self, state: QueryState) {
        self.history.truncate(self.cursor + 1);
        self.history.push(state);
        if self.history.len() > MAX_HISTORY {
            let overflow = self.history.len() - MAX_HISTORY;
            self.history.drain(..overflow);
        }
        self.cursor = self.history.len() - 1;
    }

    fn notify(&mut self) {
        self.canonical = self.get().to_query_string();
        tracing::debug!(location = %self.canonical, "Query state changed");
        self.bus.publish(Signal::QueryChanged(self.get().clone()));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
