#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use marquee_api::config::ServerConfig;
use marquee_api::router::build_app_router;
use marquee_api::state::AppState;
use marquee_core::{Character, CharacterId};
use marquee_events::EventBus;
use marquee_favorites::FavoritesStore;
use marquee_gateway::{CatalogGateway, GatewayError};
use marquee_session::{Session, SessionConfig};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 10,
        favorites_path: "favorites.json".into(),
    }
}

/// Catalog page contents keyed by page number.
pub fn page_fixture(page: u32) -> Vec<Character> {
    let base = i64::from(page) * 100;
    vec![
        Character::new(base + 1, "Elsa")
            .with_films(["Frozen"])
            .with_allies(["Anna"])
            .with_enemies(["Hans"]),
        Character::new(base + 2, "Scar")
            .with_films(["The Lion King"])
            .with_enemies(["Simba"]),
        Character::new(base + 3, "Ariel")
            .with_films(["The Little Mermaid"])
            .with_allies(["Flounder"]),
        Character::new(base + 4, "Olaf")
            .with_films(["Frozen"])
            .with_allies(["Elsa"]),
    ]
}

/// In-memory catalog with a failure switch and a call log.
#[derive(Default)]
pub struct FakeCatalog {
    failing: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn begin(&self, call: String) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(GatewayError::Status {
                status: 500,
                body: "boom".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogGateway for FakeCatalog {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Character>, GatewayError> {
        self.begin(format!("page:{page}"))?;
        Ok(page_fixture(page))
    }

    async fn fetch_by_query(&self, text: &str) -> Result<Vec<Character>, GatewayError> {
        self.begin(format!("query:{text}"))?;
        let needle = text.to_lowercase();
        Ok(page_fixture(1)
            .into_iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect())
    }

    async fn fetch_by_id(&self, id: CharacterId) -> Result<Option<Character>, GatewayError> {
        self.begin(format!("id:{id}"))?;
        Ok(page_fixture(1).into_iter().find(|c| c.id == id))
    }
}

/// Build the full application router over `catalog` with an in-memory
/// favorites store.
///
/// Uses [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app(catalog: Arc<FakeCatalog>) -> Router {
    let (app, _state) = build_test_app_with_state(catalog);
    app
}

/// Like [`build_test_app`], also returning the state for direct inspection.
pub fn build_test_app_with_state(catalog: Arc<FakeCatalog>) -> (Router, AppState) {
    let config = test_config();
    let event_bus = Arc::new(EventBus::default());
    let catalog: Arc<dyn CatalogGateway> = catalog;

    let session = Session::spawn(
        "",
        Arc::clone(&catalog),
        Arc::clone(&event_bus),
        SessionConfig {
            search_debounce: Duration::from_millis(20),
        },
    );

    let state = AppState {
        config: Arc::new(config.clone()),
        session,
        favorites: Arc::new(FavoritesStore::in_memory(Arc::clone(&event_bus))),
        catalog,
        event_bus,
    };

    (build_app_router(state.clone(), &config), state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Ids of the cards in a view response body.
pub fn card_ids(json: &serde_json::Value) -> Vec<i64> {
    json["data"]["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|card| card["character"]["_id"].as_i64().unwrap())
        .collect()
}
