use axum::{Router, routing::get};

pub mod health;
pub mod meta;
pub mod users;

/// Creates the application routes.
///
/// Takes a reference to AppState and initializes all services. Returns a
/// stateless Router (sub-routers have their state already applied).
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .route("/", get(meta::banner))
        .route("/api/health", get(health::health_check))
        .with_state(state.clone())
        .nest("/users", users::router(state))
}
