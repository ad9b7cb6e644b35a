//! Domain core for the marquee catalog browser.
//!
//! Zero internal dependencies: the entity model, the canonical query state
//! encoding and the pure filter engine live here so the session runtime,
//! the gateway and the HTTP layer all derive from one definition.

pub mod era;
pub mod error;
pub mod filter;
pub mod franchise;
pub mod options;
pub mod presentation;
pub mod query;
pub mod role;
pub mod types;

pub use filter::{apply_filters, matches_all, FilterSet};
pub use query::{QueryPatch, QueryState};
pub use role::{derive_role, Role};
pub use types::{Character, CharacterId};
