//! GET /: liveness probe. Never touches downstream services.

use axum::Json;
use serde::Serialize;

pub const HEALTH_MESSAGE: &str = "Compliance Bot API is running";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: HEALTH_MESSAGE,
    })
}
