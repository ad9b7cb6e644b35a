//! In-process signal bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`Signal`]s. It is shared
//! via `Arc<EventBus>`; subscribers unsubscribe by dropping their receiver.
//! Delivery is always asynchronous, so a publisher is never re-entered by
//! its own notification.

use chrono::Utc;
use marquee_core::types::Timestamp;
use marquee_core::QueryState;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Signal
// ---------------------------------------------------------------------------

pub const SIGNAL_QUERY_CHANGED: &str = "query.changed";
pub const SIGNAL_FAVORITES_CHANGED: &str = "favorites.changed";
pub const SIGNAL_SEARCH_COMMITTED: &str = "search.committed";

/// A typed inter-component signal. The variant is the signal name, the
/// variant data is its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signal", content = "payload", rename_all = "snake_case")]
pub enum Signal {
    /// The canonical query state changed; carries the full new state.
    QueryChanged(QueryState),
    /// The favorites store was mutated.
    FavoritesChanged,
    /// The search input settled on a value.
    SearchCommitted(String),
}

impl Signal {
    /// Dot-separated signal name, e.g. `"query.changed"`.
    pub fn name(&self) -> &'static str {
        match self {
            Signal::QueryChanged(_) => SIGNAL_QUERY_CHANGED,
            Signal::FavoritesChanged => SIGNAL_FAVORITES_CHANGED,
            Signal::SearchCommitted(_) => SIGNAL_SEARCH_COMMITTED,
        }
    }
}

/// A published signal stamped with its emission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalEvent {
    pub signal: Signal,
    pub emitted_at: Timestamp,
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out signal bus.
///
/// ```rust
/// use marquee_events::bus::{EventBus, Signal};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(Signal::FavoritesChanged);
/// ```
pub struct EventBus {
    sender: broadcast::Sender<SignalEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed signals are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a signal to all current subscribers.
    ///
    /// With no subscribers the signal is dropped.
    pub fn publish(&self, signal: Signal) {
        tracing::trace!(signal = signal.name(), "Publishing signal");
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(SignalEvent {
            signal,
            emitted_at: Utc::now(),
        });
    }

    /// Subscribe to every signal published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SignalEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let state = QueryState {
            page: 3,
            ..QueryState::default()
        };
        bus.publish(Signal::QueryChanged(state.clone()));

        let received = rx.recv().await.expect("should receive the signal");
        assert_eq!(received.signal, Signal::QueryChanged(state));
        assert_eq!(received.signal.name(), "query.changed");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_signal() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Signal::SearchCommitted("elsa".into()));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");
        assert_eq!(e1.signal, Signal::SearchCommitted("elsa".into()));
        assert_eq!(e2.signal, e1.signal);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(Signal::FavoritesChanged);
    }

    #[test]
    fn dropping_receiver_unsubscribes() {
        let bus = EventBus::default();
        let rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);
        drop(rx);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn signal_serializes_with_name_tag() {
        let json = serde_json::to_value(Signal::SearchCommitted("moana".into())).unwrap();
        assert_eq!(json["signal"], "search_committed");
        assert_eq!(json["payload"], "moana");
    }
}
