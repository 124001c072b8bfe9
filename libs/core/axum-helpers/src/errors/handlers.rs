use axum::{
    Json,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Fallback handler for unmatched routes.
///
/// Echoes the missed path and method so clients can spot typos quickly.
pub async fn route_not_found(method: Method, uri: Uri) -> Response {
    let body = Json(json!({
        "error": "Route not found",
        "path": uri.path(),
        "method": method.as_str(),
    }));

    (StatusCode::NOT_FOUND, body).into_response()
}
