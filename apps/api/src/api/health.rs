//! Application health endpoint with a real database probe.

use axum::{Json, extract::State};
use chrono::Utc;
use database::mongodb::check_health;
use serde_json::{Value, json};

use crate::state::AppState;

/// Health snapshot: database connectivity, uptime and listen port.
///
/// Always answers 200; the `database` field tells whether MongoDB is
/// reachable right now.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = if check_health(&state.client).await {
        "Connected"
    } else {
        "Disconnected"
    };

    Json(json!({
        "status": "OK",
        "database": database,
        "uptime": state.started_at.elapsed().as_secs_f64(),
        "timestamp": Utc::now().to_rfc3339(),
        "port": state.config.server.port,
    }))
}
