//! Response cache in front of any [`CatalogGateway`].
//!
//! Successful responses are kept per operation and argument; failures are
//! never cached so a retry always reaches the upstream catalog.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use marquee_core::{Character, CharacterId};
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::GatewayError;
use crate::CatalogGateway;

/// Cache key: the operation plus its argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Page(u32),
    Query(String),
    Id(CharacterId),
}

struct CacheEntry {
    stored_at: Instant,
    characters: Vec<Character>,
}

/// Caching decorator for a catalog gateway.
pub struct CachedGateway<G> {
    inner: G,
    ttl: Option<Duration>,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl<G: CatalogGateway> CachedGateway<G> {
    /// Wrap `inner`. With `ttl` of `None` entries never expire.
    pub fn new(inner: G, ttl: Option<Duration>) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Drop every cached response.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        self.ttl.is_some_and(|ttl| entry.stored_at.elapsed() >= ttl)
    }

    async fn lookup(&self, key: &CacheKey) -> Option<Vec<Character>> {
        {
            let entries = self.entries.read().await;
            let entry = entries.get(key)?;
            if !self.is_expired(entry) {
                tracing::trace!(?key, "Catalog cache hit");
                return Some(entry.characters.clone());
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| self.is_expired(entry)) {
            entries.remove(key);
            tracing::trace!(?key, "Evicted expired catalog cache entry");
        }
        None
    }

    /// Insert a fresh entry, sweeping any other entries that have expired.
    async fn store(&self, key: CacheKey, characters: &[Character]) {
        let mut entries = self.entries.write().await;
        if self.ttl.is_some() {
            entries.retain(|_, entry| !self.is_expired(entry));
        }
        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                characters: characters.to_vec(),
            },
        );
    }
}

#[async_trait]
impl<G: CatalogGateway> CatalogGateway for CachedGateway<G> {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Character>, GatewayError> {
        let key = CacheKey::Page(page);
        if let Some(hit) = self.lookup(&key).await {
            return Ok(hit);
        }
        let characters = self.inner.fetch_page(page).await?;
        self.store(key, &characters).await;
        Ok(characters)
    }

    async fn fetch_by_query(&self, text: &str) -> Result<Vec<Character>, GatewayError> {
        let key = CacheKey::Query(text.to_string());
        if let Some(hit) = self.lookup(&key).await {
            return Ok(hit);
        }
        let characters = self.inner.fetch_by_query(text).await?;
        self.store(key, &characters).await;
        Ok(characters)
    }

    async fn fetch_by_id(&self, id: CharacterId) -> Result<Option<Character>, GatewayError> {
        let key = CacheKey::Id(id);
        if let Some(hit) = self.lookup(&key).await {
            return Ok(hit.into_iter().next());
        }
        let found = self.inner.fetch_by_id(id).await?;
        self.store(key, found.as_slice()).await;
        Ok(found)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
