//! REST client for the public character catalog.
//!
//! Wraps the catalog HTTP endpoints (page listing, name search, lookup by
//! id) using [`reqwest`] and normalizes every payload.

use async_trait::async_trait;
use marquee_core::{Character, CharacterId};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::normalize::normalize;
use crate::CatalogGateway;

/// HTTP client for the catalog API.
pub struct HttpCatalogGateway {
    client: reqwest::Client,
    api_url: String,
}

impl HttpCatalogGateway {
    /// Build a client from configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    /// Reuse an existing [`reqwest::Client`].
    ///
    /// * `api_url` - Base URL, e.g. `https://api.disneyapi.dev`.
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // ---- private helpers ----

    /// Send a GET request and decode the JSON body.
    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, GatewayError> {
        let url = format!("{}{}", self.api_url, path);
        tracing::debug!(%url, ?query, "Catalog request");

        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {e}>"));
            tracing::warn!(%url, status = status.as_u16(), "Catalog returned an error status");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl CatalogGateway for HttpCatalogGateway {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Character>, GatewayError> {
        let payload = self
            .get_json("/character", &[("page", page.to_string())])
            .await?;
        Ok(normalize(payload))
    }

    async fn fetch_by_query(&self, text: &str) -> Result<Vec<Character>, GatewayError> {
        let payload = self
            .get_json("/character", &[("name", text.to_string())])
            .await?;
        Ok(normalize(payload))
    }

    async fn fetch_by_id(&self, id: CharacterId) -> Result<Option<Character>, GatewayError> {
        let payload = self.get_json(&format!("/character/{id}"), &[]).await?;
        Ok(normalize(payload).into_iter().next())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
