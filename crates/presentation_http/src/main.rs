//! PlotGuard HTTP Server
//!
//! Main entry point for the policy and placement API.

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use infrastructure::{AppConfig, init_telemetry};
use presentation_http::{
    ReloadableConfig, error::set_expose_internal_errors, routes, spawn_config_reload_handler,
    state::AppState,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (initial_config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_telemetry(&initial_config.telemetry())?;

    info!("PlotGuard v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    let rules = initial_config
        .placement
        .location_rules()
        .map_err(|e| anyhow::anyhow!("Invalid placement configuration: {e}"))?;

    info!(
        environment = %initial_config.environment,
        host = %initial_config.server.host,
        port = %initial_config.server.port,
        region_center = %rules.region_center,
        region_radius_km = rules.region_radius_km,
        "Configuration loaded"
    );

    set_expose_internal_errors(!initial_config.environment.is_production());

    let reloadable_config =
        spawn_config_reload_handler(ReloadableConfig::new(initial_config.clone()));
    let state = AppState::new(reloadable_config);

    let mut app = routes::create_router(state).layer(TraceLayer::new_for_http());
    if initial_config.server.cors_enabled {
        app = app.layer(cors_layer(&initial_config.server.allowed_origins));
    }

    let addr = initial_config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);
    info!("OpenAPI document: http://{}/openapi.json", addr);

    let shutdown_timeout =
        Duration::from_secs(initial_config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Any origin when none are configured, otherwise only the listed ones
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring unparsable CORS origin");
                None
            },
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }

    info!("Waiting up to {:?} for connections to close", timeout);
}
