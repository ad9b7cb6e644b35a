//! Catalog gateway: the two read operations the session consumes.
//!
//! - [`CatalogGateway`]: async trait every catalog source implements.
//! - [`HttpCatalogGateway`]: [`reqwest`] client for the public catalog API.
//! - [`CachedGateway`]: response cache wrapper keyed by operation.
//! - [`normalize`]: payload shape normalization into plain entity lists.

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod normalize;

use async_trait::async_trait;
use marquee_core::{Character, CharacterId};

pub use cache::CachedGateway;
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpCatalogGateway;

/// Read access to the character catalog.
///
/// Every operation returns a normalized entity list, never a wrapped
/// envelope.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Fetch one 1-based page of the catalog.
    async fn fetch_page(&self, page: u32) -> Result<Vec<Character>, GatewayError>;

    /// Fetch characters matching `text` by name. Callers pass trimmed,
    /// non-empty text.
    async fn fetch_by_query(&self, text: &str) -> Result<Vec<Character>, GatewayError>;

    /// Fetch a single character by id.
    async fn fetch_by_id(&self, id: CharacterId) -> Result<Option<Character>, GatewayError>;
}
