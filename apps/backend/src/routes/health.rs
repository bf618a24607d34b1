//! Health endpoint

use axum::{extract::State, Json};
use chrono::Utc;

use crate::models::HealthResponse;
use crate::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!("Store ping failed: {}", e);
            "disconnected"
        }
    };

    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Korean vocabulary backend is running".to_string(),
        timestamp: Utc::now(),
        store: state.store.backend().to_string(),
        database: database.to_string(),
        ai_configured: state.generator.is_some(),
    })
}
