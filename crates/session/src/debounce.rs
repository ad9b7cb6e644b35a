//! Timer-gated search commit.
//!
//! Each keystroke replaces the pending timer token, so only the timer armed
//! by the latest input can commit. Blank input commits immediately.

use std::time::Duration;

/// What the runtime should do with a raw search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceAction {
    /// Commit this value right away.
    CommitNow(String),
    /// Arm a timer; call [`SearchDebouncer::elapsed`] with `token` when it fires.
    Schedule { token: u64, delay: Duration },
}

struct Pending {
    token: u64,
    value: String,
}

pub struct SearchDebouncer {
    delay: Duration,
    next_token: u64,
    pending: Option<Pending>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_token: 0,
            pending: None,
        }
    }

    /// Register a raw input value. Invalidates any pending timer.
    pub fn input(&mut self, raw: &str) -> DebounceAction {
        let value = raw.trim();
        if value.is_empty() {
            self.pending = None;
            return DebounceAction::CommitNow(String::new());
        }

        self.next_token += 1;
        self.pending = Some(Pending {
            token: self.next_token,
            value: value.to_string(),
        });
        DebounceAction::Schedule {
            token: self.next_token,
            delay: self.delay,
        }
    }

    /// A timer fired. Returns the value to commit when `token` is still the
    /// pending one.
    pub fn elapsed(&mut self, token: u64) -> Option<String> {
        match &self.pending {
            Some(pending) if pending.token == token => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Drop the pending timer, e.g. when a value is committed directly.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
