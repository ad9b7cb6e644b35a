//! Browse session runtime.
//!
//! - [`QueryStore`]: the single mutator of the query state, with history.
//! - [`ResultCoordinator`]: fetch/filter state machine with stale-response
//!   protection.
//! - [`SearchDebouncer`]: timer-gated search commits.
//! - [`Session`] / [`SessionHandle`]: the task that wires them to the
//!   signal bus and the catalog gateway.

pub mod config;
pub mod coordinator;
pub mod debounce;
pub mod error;
pub mod query_store;
pub mod session;
pub mod view;

pub use config::SessionConfig;
pub use coordinator::{Completion, FetchKind, FetchRequest, Phase, ResultCoordinator};
pub use debounce::{DebounceAction, SearchDebouncer};
pub use error::SessionError;
pub use query_store::QueryStore;
pub use session::{Session, SessionHandle};
pub use view::{ResultView, ViewStatus};
