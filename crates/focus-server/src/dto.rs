use focus_config::AppEnv;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Parses a request body as JSON without looking at its `Content-Type`.
pub fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
}

// === Utility DTOs ===

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Deserialize, Default)]
pub struct HelloQuery {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct EchoResponse {
    pub echoed: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct EnvResponse {
    pub env: AppEnv,
}

// === Todo DTOs ===

/// `title` is optional so a missing field gets the same 400 as a blank one.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
