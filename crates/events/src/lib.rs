//! Marquee signal bus.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`Signal`]: the typed signals exchanged between the query store, the
//!   result coordinator, the favorites store and view fragments.
//! - [`SignalTracer`]: background task logging every signal.

pub mod bus;
pub mod tracer;

pub use bus::{EventBus, Signal, SignalEvent};
pub use tracer::SignalTracer;
