//! # Axum Helpers
//!
//! A collection of utilities and middleware for building Axum web
//! applications.
//!
//! ## Modules
//!
//! - **[`server`]**: Server setup, liveness endpoint, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS allow-list enforcement, security headers)
//! - **[`errors`]**: Fallback handlers for unmatched routes
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(routes).await?;
//!     let app = router.merge(health_router(app_info!()));
//!
//!     create_app(app, &ServerConfig::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod http;
pub mod server;

// Re-export HTTP middleware
pub use http::{AllowedOrigins, create_cors_layer, enforce_allowed_origin, security_headers};

// Re-export server types
pub use server::{
    HealthResponse, ShutdownCoordinator, create_app, create_production_app, create_router,
    health_router, shutdown_signal,
};
