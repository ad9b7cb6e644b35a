//! Result coordinator state machine.
//!
//! [`ResultCoordinator`] owns the held catalog window and the filtered view
//! derived from it. It performs no I/O: query changes come in, and when a
//! page or search change requires new data it hands back a
//! [`FetchRequest`] for the runtime to execute. Completions carry the
//! request token; only the most recently issued token is applied.
//!
//! ```text
//! idle -> loading -> ready | error
//! ready | error -> loading      (page/search change, retry)
//! ```

use marquee_core::{apply_filters, Character, QueryState};
use marquee_gateway::GatewayError;
use serde::Serialize;

/// Lifecycle phase of the result area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Error { message: String },
}

/// The gateway call a fetch resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "arg", rename_all = "snake_case")]
pub enum FetchKind {
    Page(u32),
    Query(String),
}

impl FetchKind {
    /// Query fetch for non-blank search text, page fetch otherwise.
    pub fn for_state(state: &QueryState) -> Self {
        match state.search_text() {
            Some(text) => FetchKind::Query(text.to_string()),
            None => FetchKind::Page(state.page),
        }
    }
}

/// A fetch to execute, tagged with the token that must still be current
/// when it completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub token: u64,
    pub kind: FetchKind,
}

/// Outcome of delivering a fetch completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

pub struct ResultCoordinator {
    phase: Phase,
    /// Latest query state seen.
    query: QueryState,
    /// Query state whose page/search the held window was requested for.
    fetched_for: Option<QueryState>,
    window: Vec<Character>,
    view: Vec<Character>,
    token: u64,
    last_kind: Option<FetchKind>,
}

impl Default for ResultCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCoordinator {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            query: QueryState::default(),
            fetched_for: None,
            window: Vec::new(),
            view: Vec::new(),
            token: 0,
            last_kind: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// The filtered view, in catalog order.
    pub fn view(&self) -> &[Character] {
        &self.view
    }

    /// The held, unfiltered catalog window.
    pub fn window(&self) -> &[Character] {
        &self.window
    }

    /// Token of the most recently issued fetch.
    pub fn current_token(&self) -> u64 {
        self.token
    }

    /// React to a query state change.
    ///
    /// A page or search change (or the very first state) issues a fetch;
    /// a change limited to franchise/role/era only re-filters the held
    /// window.
    pub fn on_query_changed(&mut self, state: QueryState) -> Option<FetchRequest> {
        let refetch = match &self.fetched_for {
            None => true,
            Some(prev) => prev.page != state.page || prev.search != state.search,
        };
        self.query = state;

        if refetch {
            self.fetched_for = Some(self.query.clone());
            Some(self.issue(FetchKind::for_state(&self.query)))
        } else {
            self.refilter();
            None
        }
    }

    /// Deliver the outcome of the fetch issued with `token`.
    ///
    /// Outcomes for any token other than the latest are discarded.
    pub fn on_fetch_completed(
        &mut self,
        token: u64,
        result: Result<Vec<Character>, GatewayError>,
    ) -> Completion {
        if token != self.token {
            tracing::debug!(token, current = self.token, "Dropping stale catalog response");
            return Completion::Stale;
        }

        match result {
            Ok(characters) => {
                self.window = characters;
                self.refilter();
                self.phase = Phase::Ready;
                tracing::debug!(
                    token,
                    window = self.window.len(),
                    matched = self.view.len(),
                    "Catalog window replaced"
                );
            }
            Err(e) => {
                tracing::warn!(token, error = %e, "Catalog fetch failed");
                self.phase = Phase::Error {
                    message: e.user_message(),
                };
            }
        }
        Completion::Applied
    }

    /// Re-issue the last fetch. Only allowed from the error phase.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        if !matches!(self.phase, Phase::Error { .. }) {
            return None;
        }
        let kind = self.last_kind.clone()?;
        Some(self.issue(kind))
    }

    // ---- private helpers ----

    fn issue(&mut self, kind: FetchKind) -> FetchRequest {
        self.token += 1;
        self.phase = Phase::Loading;
        self.last_kind = Some(kind.clone());
        tracing::debug!(token = self.token, ?kind, "Issuing catalog fetch");
        FetchRequest {
            token: self.token,
            kind,
        }
    }

    /// Always a fresh derivation from the window and current filters.
    fn refilter(&mut self) {
        self.view = apply_filters(&self.window, &self.query.filters());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
