mod dto;
mod error;
mod handlers;


use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post, put};
use axum::Router;
use focus_config::Settings;
use focus_store::TodoStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct ServerState {
    pub store: TodoStore,
    pub settings: Settings,
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env().context("failed to read settings")?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let target = settings.database()?;
    let store = TodoStore::from_target(&target).context("failed to open todo store")?;
    let addr = settings.bind_addr();
    info!("Environment: {}", settings.app_env);

    let state = Arc::new(ServerState { store, settings });
    let app = build_app(state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

fn build_app(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let api_routes = Router::new()
        .route("/api/hello", get(handlers::hello))
        .route("/api/echo", post(handlers::echo))
        .route("/api/env", get(handlers::env))
        .route(
            "/api/todos",
            get(handlers::todos::list).post(handlers::todos::create),
        )
        .route("/api/todos/{id}", axum::routing::delete(handlers::todos::delete))
        .route("/api/todos/{id}/done", put(handlers::todos::mark_done))
        .route("/api/todos/{id}/undone", put(handlers::todos::mark_undone))
        .layer(trace_layer);

    Router::new()
        .merge(api_routes)
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}
