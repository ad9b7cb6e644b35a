//! Session runtime.
//!
//! One spawned task owns the [`QueryStore`], the [`ResultCoordinator`] and
//! the [`SearchDebouncer`], so every trigger is handled one at a time on a
//! single dispatch path. Callers talk to it through a cloneable
//! [`SessionHandle`]; the display layer watches [`ResultView`] snapshots.
//!
//! The task reacts to query changes through the signal bus rather than by
//! direct call, so a notification is never handled re-entrantly inside the
//! mutation that produced it. A session assumes it is the only query-state
//! owner on its bus.

use std::sync::Arc;
use std::time::Duration;

use marquee_core::{Character, QueryPatch, QueryState};
use marquee_events::{EventBus, Signal, SignalEvent};
use marquee_gateway::{CatalogGateway, GatewayError};
use tokio::sync::{broadcast, mpsc, oneshot, watch};

use crate::config::{SessionConfig, SUGGESTION_LIMIT, SUGGESTION_MIN_CHARS};
use crate::coordinator::{Completion, FetchKind, FetchRequest, ResultCoordinator};
use crate::debounce::{DebounceAction, SearchDebouncer};
use crate::error::SessionError;
use crate::query_store::QueryStore;
use crate::view::ResultView;

/// Command channel capacity.
const COMMAND_CAPACITY: usize = 64;

type Reply<T> = oneshot::Sender<T>;

enum Command {
    Current(Reply<QueryState>),
    Update(QueryPatch, Reply<QueryState>),
    Reset(Reply<QueryState>),
    Navigate(String, Reply<QueryState>),
    Back(Reply<QueryState>),
    Forward(Reply<QueryState>),
    NextPage(Reply<QueryState>),
    PrevPage(Reply<QueryState>),
    Retry(Reply<bool>),
    SearchInput(String),
    CommitSearch(String, Reply<QueryState>),
}

/// Results of work the session spawned.
enum Internal {
    FetchDone {
        token: u64,
        result: Result<Vec<Character>, GatewayError>,
    },
    DebounceElapsed {
        token: u64,
    },
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct Session {
    store: QueryStore,
    coordinator: ResultCoordinator,
    debouncer: SearchDebouncer,
    gateway: Arc<dyn CatalogGateway>,
    bus: Arc<EventBus>,
    view_tx: watch::Sender<ResultView>,
    internal_tx: mpsc::UnboundedSender<Internal>,
}

impl Session {
    /// Start a session at `location` (a canonical query string) and spawn
    /// its task on the current Tokio runtime.
    ///
    /// The initial catalog load is issued immediately.
    pub fn spawn(
        location: &str,
        gateway: Arc<dyn CatalogGateway>,
        bus: Arc<EventBus>,
        config: SessionConfig,
    ) -> SessionHandle {
        let store = QueryStore::init(location, Arc::clone(&bus));
        let (view_tx, view_rx) = watch::channel(ResultView::idle(store.get().clone()));
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();
        // Subscribe before anything can publish.
        let signals = bus.subscribe();

        let session = Session {
            store,
            coordinator: ResultCoordinator::new(),
            debouncer: SearchDebouncer::new(config.search_debounce),
            gateway: Arc::clone(&gateway),
            bus,
            view_tx,
            internal_tx,
        };
        tokio::spawn(session.run(command_rx, signals, internal_rx));

        SessionHandle {
            commands: command_tx,
            view: view_rx,
            gateway,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut signals: broadcast::Receiver<SignalEvent>,
        mut internal: mpsc::UnboundedReceiver<Internal>,
    ) {
        tracing::info!(location = %self.store.canonical(), "Session started");
        self.on_query_changed(self.store.get().clone());
        self.publish_view();

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(message) = internal.recv() => self.handle_internal(message),
                signal = signals.recv() => match signal {
                    Ok(event) => self.handle_signal(event.signal),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Session lagged behind the signal bus, resyncing");
                        self.on_query_changed(self.store.get().clone());
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
            self.publish_view();
        }

        tracing::info!("Session stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Current(reply) => {
                let _ = reply.send(self.store.get().clone());
            }
            Command::Update(patch, reply) => {
                self.store.set(&patch);
                let _ = reply.send(self.store.get().clone());
            }
            Command::Reset(reply) => {
                self.debouncer.cancel();
                self.store.reset();
                let _ = reply.send(self.store.get().clone());
            }
            Command::Navigate(location, reply) => {
                self.store.navigate(&location);
                let _ = reply.send(self.store.get().clone());
            }
            Command::Back(reply) => {
                self.store.back();
                let _ = reply.send(self.store.get().clone());
            }
            Command::Forward(reply) => {
                self.store.forward();
                let _ = reply.send(self.store.get().clone());
            }
            Command::NextPage(reply) => {
                let patch = self.store.get().next_page();
                self.store.set(&patch);
                let _ = reply.send(self.store.get().clone());
            }
            Command::PrevPage(reply) => {
                let patch = self.store.get().prev_page();
                self.store.set(&patch);
                let _ = reply.send(self.store.get().clone());
            }
            Command::Retry(reply) => {
                let retried = match self.coordinator.retry() {
                    Some(request) => {
                        self.spawn_fetch(request);
                        true
                    }
                    None => false,
                };
                // Loading must be visible before the caller waits on the view.
                self.publish_view();
                let _ = reply.send(retried);
            }
            Command::SearchInput(raw) => match self.debouncer.input(&raw) {
                DebounceAction::CommitNow(value) => {
                    self.bus.publish(Signal::SearchCommitted(value));
                }
                DebounceAction::Schedule { token, delay } => self.spawn_timer(token, delay),
            },
            Command::CommitSearch(value, reply) => {
                self.debouncer.cancel();
                let value = value.trim().to_string();
                let expected = self.store.get().apply(&QueryPatch::committed_search(value.clone()));
                self.bus.publish(Signal::SearchCommitted(value));
                let _ = reply.send(expected);
            }
        }
    }

    fn handle_internal(&mut self, message: Internal) {
        match message {
            Internal::FetchDone { token, result } => {
                if self.coordinator.on_fetch_completed(token, result) == Completion::Stale {
                    tracing::debug!(token, "Ignored superseded fetch");
                }
            }
            Internal::DebounceElapsed { token } => {
                if let Some(value) = self.debouncer.elapsed(token) {
                    self.bus.publish(Signal::SearchCommitted(value));
                }
            }
        }
    }

    fn handle_signal(&mut self, signal: Signal) {
        match signal {
            Signal::QueryChanged(state) => self.on_query_changed(state),
            Signal::SearchCommitted(value) => {
                self.store.set(&QueryPatch::committed_search(value));
            }
            // Favorites never take part in filtering.
            Signal::FavoritesChanged => {}
        }
    }

    fn on_query_changed(&mut self, state: QueryState) {
        if let Some(request) = self.coordinator.on_query_changed(state) {
            self.spawn_fetch(request);
        }
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.internal_tx.clone();
        tokio::spawn(async move {
            let result = match &request.kind {
                FetchKind::Page(page) => gateway.fetch_page(*page).await,
                FetchKind::Query(text) => gateway.fetch_by_query(text).await,
            };
            // The session may have stopped in the meantime.
            let _ = tx.send(Internal::FetchDone {
                token: request.token,
                result,
            });
        });
    }

    fn spawn_timer(&self, token: u64, delay: Duration) {
        let tx = self.internal_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Internal::DebounceElapsed { token });
        });
    }

    fn publish_view(&self) {
        self.view_tx.send_replace(ResultView::from_coordinator(
            &self.coordinator,
            self.store.can_go_back(),
            self.store.can_go_forward(),
        ));
    }
}

// ---------------------------------------------------------------------------
// SessionHandle
// ---------------------------------------------------------------------------

/// Cheaply cloneable handle to a running session.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    view: watch::Receiver<ResultView>,
    gateway: Arc<dyn CatalogGateway>,
}

impl SessionHandle {
    /// Latest published view.
    pub fn view(&self) -> ResultView {
        self.view.borrow().clone()
    }

    /// Watch every republished view.
    pub fn subscribe_view(&self) -> watch::Receiver<ResultView> {
        self.view.clone()
    }

    /// Current query state held by the store.
    pub async fn current(&self) -> Result<QueryState, SessionError> {
        self.request(Command::Current).await
    }

    /// Merge a partial update over the query state.
    pub async fn update(&self, patch: QueryPatch) -> Result<QueryState, SessionError> {
        patch.validate()?;
        self.request(|reply| Command::Update(patch, reply)).await
    }

    pub async fn reset(&self) -> Result<QueryState, SessionError> {
        self.request(Command::Reset).await
    }

    /// Load an external canonical representation.
    pub async fn navigate(&self, location: impl Into<String>) -> Result<QueryState, SessionError> {
        let location = location.into();
        self.request(|reply| Command::Navigate(location, reply)).await
    }

    pub async fn back(&self) -> Result<QueryState, SessionError> {
        self.request(Command::Back).await
    }

    pub async fn forward(&self) -> Result<QueryState, SessionError> {
        self.request(Command::Forward).await
    }

    pub async fn next_page(&self) -> Result<QueryState, SessionError> {
        self.request(Command::NextPage).await
    }

    pub async fn prev_page(&self) -> Result<QueryState, SessionError> {
        self.request(Command::PrevPage).await
    }

    /// Re-issue the failed fetch. Returns `false` when not in the error state.
    pub async fn retry(&self) -> Result<bool, SessionError> {
        self.request(Command::Retry).await
    }

    /// Feed raw search input through the debouncer.
    pub async fn search_input(&self, raw: impl Into<String>) -> Result<(), SessionError> {
        self.commands
            .send(Command::SearchInput(raw.into()))
            .await
            .map_err(|_| SessionError::Closed)
    }

    /// Commit a search value immediately (e.g. a selected suggestion).
    ///
    /// Returns the state the commit resolves to.
    pub async fn commit_search(&self, value: impl Into<String>) -> Result<QueryState, SessionError> {
        let value = value.into();
        self.request(|reply| Command::CommitSearch(value, reply)).await
    }

    /// Wait until the view reflects `expected` and is no longer loading.
    pub async fn settled(
        &self,
        expected: &QueryState,
        timeout: Duration,
    ) -> Result<ResultView, SessionError> {
        let mut rx = self.view.clone();
        let wait = rx.wait_for(|view| view.query == *expected && view.status.is_settled());
        let result = match tokio::time::timeout(timeout, wait).await {
            Ok(Ok(view)) => Ok(view.clone()),
            Ok(Err(_)) => Err(SessionError::Closed),
            Err(_) => Err(SessionError::Timeout),
        };
        result
    }

    /// Up to five name suggestions for `text`. Text shorter than two
    /// characters yields no suggestions and no catalog call.
    pub async fn suggestions(&self, text: &str) -> Result<Vec<Character>, GatewayError> {
        let text = text.trim();
        if text.chars().count() < SUGGESTION_MIN_CHARS {
            return Ok(Vec::new());
        }
        let mut found = self.gateway.fetch_by_query(text).await?;
        found.truncate(SUGGESTION_LIMIT);
        Ok(found)
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(Reply<T>) -> Command,
    ) -> Result<T, SessionError> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(command(tx))
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)
    }
}
