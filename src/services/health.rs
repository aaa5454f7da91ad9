use axum::{extract::State, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::services::registry::SessionRegistry;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_seconds: u64,
    pub active_sessions: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
    pub start_time: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        let state = AppState {
            registry,
            start_time: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .route("/health/live", get(liveness_check))
            .with_state(state);

        Self { router }
    }
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let now = Utc::now();
    let uptime = now
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: now,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        active_sessions: state.registry.active_sessions(now),
    })
}

async fn readiness_check() -> Json<&'static str> {
    // All state is in memory; once the router is serving, the bot is ready.
    Json("ready")
}

async fn liveness_check() -> Json<&'static str> {
    Json("alive")
}
