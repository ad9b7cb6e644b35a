//! Signal tracing service.
//!
//! [`SignalTracer`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and logs every received [`Signal`](crate::bus::Signal). It runs as a
//! long-lived background task and stops when the bus is dropped.

use tokio::sync::broadcast;

use crate::bus::{Signal, SignalEvent};

/// Background service that logs signals.
pub struct SignalTracer;

impl SignalTracer {
    /// Run the tracing loop until the channel closes.
    ///
    /// Returns the number of signals observed.
    pub async fn run(mut receiver: broadcast::Receiver<SignalEvent>) -> u64 {
        let mut seen = 0u64;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    seen += 1;
                    Self::trace(&event);
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Signal tracer lagged, some signals were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!(seen, "Signal bus closed, tracer shutting down");
                    break;
                }
            }
        }
        seen
    }

    fn trace(event: &SignalEvent) {
        let name = event.signal.name();
        match &event.signal {
            Signal::QueryChanged(state) => tracing::debug!(
                signal = name,
                location = %state.to_query_string(),
                emitted_at = %event.emitted_at,
                "Signal"
            ),
            Signal::SearchCommitted(value) => {
                tracing::debug!(signal = name, value = %value, "Signal")
            }
            Signal::FavoritesChanged => tracing::debug!(signal = name, "Signal"),
        }
    }
}
