use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::{database, error::ApiError, AppState};

/// Health check endpoint with database connectivity check
pub async fn health_check(State(app_state): State<AppState>) -> Result<Json<Value>, ApiError> {
    database::health_check(&app_state.db_pool).await?;

    Ok(Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "company-registry",
    })))
}

/// Liveness check endpoint for load balancers; no dependencies touched
pub async fn liveness_check() -> Json<Value> {
    Json(json!({
        "status": "alive",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
