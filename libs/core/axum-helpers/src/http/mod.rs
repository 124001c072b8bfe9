//! HTTP middleware module.
//!
//! This module provides HTTP-level middleware for:
//! - CORS allow-list configuration and enforcement
//! - Security headers
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{create_cors_layer, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(create_cors_layer(origins));
//! ```

pub mod cors;
pub mod security;

// Re-export commonly used functions
pub use cors::{AllowedOrigins, create_cors_layer, enforce_allowed_origin};
pub use security::security_headers;
