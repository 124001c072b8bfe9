//! Application state management.
//!
//! Defines the shared application state passed to request handlers. Holding
//! the persistence handles here (rather than in ambient globals) keeps
//! construction explicit, so tests can assemble a state of their own.

use std::time::Instant;

/// Shared application state.
///
/// Cloned per handler; the MongoDB client and database handles are cheap
/// Arc-backed clones over one connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client, used for health probes and shutdown
    pub client: database::mongodb::Client,
    /// Handle to the configured database
    pub db: database::mongodb::Database,
    /// Process start time, reported as uptime by the health endpoint
    pub started_at: Instant,
}
