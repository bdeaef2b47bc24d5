//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use mapgal_common::Phase;
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    /// Gallery lifecycle phase; stays `unloaded` if the dataset fetch failed
    pub phase: Phase,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let phase = state.gallery.read().await.session().phase();
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "mapgal-gv".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        phase,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
