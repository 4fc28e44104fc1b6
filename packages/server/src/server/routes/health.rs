use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    image_editing_configured: bool,
    trend_agents: Vec<String>,
}

/// Health check endpoint
///
/// Reports which capabilities are wired; upstream services are not probed.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        image_editing_configured: state.server_deps.image_editing_configured(),
        trend_agents: state.server_deps.trend_agents.names(),
    })
}
