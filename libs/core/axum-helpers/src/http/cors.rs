use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// The configured origin allow-list, shared with the enforcement middleware.
#[derive(Clone)]
pub struct AllowedOrigins(Arc<[HeaderValue]>);

impl AllowedOrigins {
    /// Parse a comma-separated origin list, e.g.
    /// `http://localhost:3000,https://example.com`.
    ///
    /// Returns an error when the list is empty or an entry is not a valid
    /// header value.
    pub fn parse(origins: &str) -> Result<Self, String> {
        let parsed: Vec<HeaderValue> = origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<HeaderValue>()
                    .map_err(|e| format!("Invalid origin '{}': {}", s, e))
            })
            .collect::<Result<_, _>>()?;

        if parsed.is_empty() {
            return Err("origin allow-list cannot be empty".to_string());
        }

        Ok(Self(parsed.into()))
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.iter().any(|allowed| allowed == origin)
    }

    pub fn as_slice(&self) -> &[HeaderValue] {
        &self.0
    }
}

/// Creates a CORS layer restricted to the given allow-list.
///
/// Configured with:
/// - Common HTTP methods (GET, POST, PUT, DELETE, PATCH, OPTIONS)
/// - Common headers (Content-Type, Authorization, Accept, Cookie, x-csrf-token)
/// - Credentials allowed
/// - 1 hour max age
pub fn create_cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins.as_slice().to_vec()))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::COOKIE,
            HeaderName::from_static("x-csrf-token"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Middleware that rejects requests from origins outside the allow-list.
///
/// Requests without an `Origin` header (curl, server-to-server, mobile
/// clients) pass through untouched. Requests carrying a disallowed origin
/// are answered with 403 before any handler runs.
pub async fn enforce_allowed_origin(
    State(allowed): State<AllowedOrigins>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        if !allowed.contains(origin) {
            tracing::warn!(origin = ?origin, "Rejected request from disallowed origin");
            return (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": "CORS policy violation",
                    "message": "Origin not allowed",
                })),
            )
                .into_response();
        }
    }

    next.run(request).await
}
