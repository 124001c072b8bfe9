use axum::{Json, extract::State};
use chrono::Utc;
use serde_json::{Value, json};

use crate::state::AppState;

/// Root banner confirming the API is up.
pub async fn banner(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Hello World! API is running",
        "timestamp": Utc::now().to_rfc3339(),
        "environment": state.config.environment.as_str(),
    }))
}
