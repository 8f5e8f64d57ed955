use crate::{models::HealthStatus, services::InferenceEngine};
use axum::{extract::State, Json};
use chrono::Utc;
use std::time::Instant;

#[derive(Clone)]
pub struct HealthState {
    pub engine: InferenceEngine,
    pub started_at: Instant,
}

/// Liveness only. Does not spend an upstream call.
pub async fn health_check(State(state): State<HealthState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        feature_count: state.engine.feature_count(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        timestamp: Utc::now(),
    })
}
