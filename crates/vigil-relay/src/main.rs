//! Vigil relay binary — the main entry point for the audit-log relay.
//!
//! Loads configuration, initializes structured logging, exposes a liveness
//! endpoint, and runs the gateway receive loop until the stream ends or a
//! SIGTERM/SIGINT requests graceful shutdown.

mod config;
mod dispatcher;
mod gateway;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use vigil_handlers::RelayContext;

/// Health check handler.
///
/// Returns `200 OK` with relay status and version. Used by supervisors
/// and monitoring to verify the relay is running.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": "0.0.1"
    }))
}

/// Builds the liveness router.
fn app() -> Router {
    Router::new().route("/health", get(health))
}

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("VIGIL_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

#[tokio::main]
async fn main() {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    // Load configuration
    let config = config::load_config(selected_config_path)
        .expect("failed to load configuration — the relay cannot start without valid config");
    config
        .validate()
        .expect("incomplete configuration — set platform.token, platform.gateway_url, and platform.api_base");

    // Initialize tracing
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    // Wire the handler context and dispatcher
    let ctx = RelayContext::new(config.destinations.bindings());
    let dispatcher =
        dispatcher::RestDispatcher::new(&config.platform.api_base, &config.platform.token);

    // Liveness endpoint
    let addr = SocketAddr::new(config.health.host, config.health.port);
    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind health endpoint — is another process using this port?");
    tracing::info!(%addr, "health endpoint listening");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app()).await {
            tracing::error!(error = %e, "health endpoint terminated");
        }
    });

    tracing::info!("starting vigil relay");

    // Run the gateway loop until the stream ends or shutdown is requested.
    // An in-flight delivery is abandoned on shutdown; the platform owns
    // any retry semantics.
    tokio::select! {
        result = gateway::run(
            &config.platform.gateway_url,
            &config.platform.token,
            &ctx,
            &dispatcher,
        ) => match result {
            Ok(()) => tracing::info!("gateway stream ended"),
            Err(e) => tracing::error!(error = %e, "gateway connection failed"),
        },
        () = shutdown_signal() => {}
    }

    tracing::info!("vigil relay shut down");
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
