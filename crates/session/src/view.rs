//! The display-facing snapshot the session republishes after every change.

use marquee_core::{Character, QueryState};
use serde::Serialize;

use crate::coordinator::{Phase, ResultCoordinator};

/// Display state of the result area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    Idle,
    Loading,
    Ready,
    /// Loaded, but nothing passed the filters. Not an error.
    NoMatches,
    Error,
}

impl ViewStatus {
    /// Whether the view reflects a finished load (successful or not).
    pub fn is_settled(self) -> bool {
        !matches!(self, ViewStatus::Idle | ViewStatus::Loading)
    }
}

/// Snapshot of the result area.
#[derive(Debug, Clone, Serialize)]
pub struct ResultView {
    pub status: ViewStatus,
    /// User-facing message when `status` is `error`.
    pub message: Option<String>,
    pub query: QueryState,
    /// Canonical representation of `query`.
    pub location: String,
    pub items: Vec<Character>,
    /// Size of the unfiltered window the items were derived from.
    pub window_size: usize,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

impl ResultView {
    pub fn idle(query: QueryState) -> Self {
        Self {
            status: ViewStatus::Idle,
            message: None,
            location: query.to_query_string(),
            query,
            items: Vec::new(),
            window_size: 0,
            can_go_back: false,
            can_go_forward: false,
        }
    }

    pub(crate) fn from_coordinator(
        coordinator: &ResultCoordinator,
        can_go_back: bool,
        can_go_forward: bool,
    ) -> Self {
        let (status, message) = match coordinator.phase() {
            Phase::Idle => (ViewStatus::Idle, None),
            Phase::Loading => (ViewStatus::Loading, None),
            Phase::Ready if coordinator.view().is_empty() => (ViewStatus::NoMatches, None),
            Phase::Ready => (ViewStatus::Ready, None),
            Phase::Error { message } => (ViewStatus::Error, Some(message.clone())),
        };
        let query = coordinator.query().clone();

        Self {
            status,
            message,
            location: query.to_query_string(),
            query,
            items: coordinator.view().to_vec(),
            window_size: coordinator.window().len(),
            can_go_back,
            can_go_forward,
        }
    }
}
