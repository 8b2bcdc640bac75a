//! HTTP route handlers for the Focus Board server.

pub mod todos;

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::Json;

use crate::dto::{parse_json_body, EchoResponse, EnvResponse, HealthResponse, HelloQuery, HelloResponse};
use crate::error::AppError;
use crate::ServerState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET / - The Focus Board page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /api/hello?name= - Greets `name`, or the world when it is missing or empty.
pub async fn hello(Query(query): Query<HelloQuery>) -> Json<HelloResponse> {
    let name = query
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "world".into());
    Json(HelloResponse {
        message: format!("Hello, {}!", name),
    })
}

/// POST /api/echo - Returns the request body untouched, whatever its content type.
pub async fn echo(body: Bytes) -> Result<Json<EchoResponse>, AppError> {
    let echoed: serde_json::Value = parse_json_body(&body)?;
    Ok(Json(EchoResponse { echoed }))
}

/// GET /api/env - The environment mode the server was started in.
pub async fn env(State(state): State<Arc<ServerState>>) -> Json<EnvResponse> {
    Json(EnvResponse {
        env: state.settings.app_env,
    })
}
