use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_api::config::ServerConfig;
use marquee_api::router::build_app_router;
use marquee_api::state::AppState;
use marquee_events::{EventBus, SignalTracer};
use marquee_favorites::FavoritesStore;
use marquee_gateway::{CachedGateway, CatalogGateway, GatewayConfig, HttpCatalogGateway};
use marquee_session::{Session, SessionConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "marquee_api=debug,marquee_session=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    let gateway_config = GatewayConfig::from_env();
    let session_config = SessionConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        catalog = %gateway_config.api_url,
        "Loaded server configuration"
    );

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    let tracer_handle = tokio::spawn(SignalTracer::run(event_bus.subscribe()));

    // --- Catalog gateway ---
    let http = HttpCatalogGateway::new(&gateway_config).expect("Failed to build catalog client");
    let catalog: Arc<dyn CatalogGateway> =
        Arc::new(CachedGateway::new(http, gateway_config.cache_ttl()));
    tracing::info!(ttl_secs = gateway_config.cache_ttl_secs, "Catalog gateway ready");

    // --- Favorites ---
    let favorites = Arc::new(FavoritesStore::load(
        &config.favorites_path,
        Arc::clone(&event_bus),
    ));

    // --- Browse session ---
    let session = Session::spawn(
        "",
        Arc::clone(&catalog),
        Arc::clone(&event_bus),
        session_config,
    );

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        session,
        favorites,
        catalog,
        event_bus: Arc::clone(&event_bus),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // The router (and with it the session handle and favorites store) is
    // gone; dropping the last bus reference closes the channel.
    drop(event_bus);
    match tokio::time::timeout(Duration::from_secs(5), tracer_handle).await {
        Ok(Ok(signals)) => tracing::info!(signals, "Signal tracer stopped"),
        _ => tracing::warn!("Signal tracer did not stop in time"),
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM (on Unix) to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
