use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::{Duration, Instant};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    // Connect to MongoDB with bounded retry on transient startup failures
    let client = database::mongodb::connect_from_config_with_retry(&config.mongo, None)
        .await
        .map_err(|e| eyre::eyre!("MongoDB connection failed: {}", e))?;
    let db = client.database(&config.mongo.database);

    // The unique email index must exist before the first request lands
    let repository = domain_users::MongoUserRepository::new(db.clone());
    repository
        .ensure_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to ensure user indexes: {}", e))?;
    info!("Ensured unique email index on the users collection");

    // Initialize the application state with database connections
    let state = AppState {
        config,
        client,
        db,
        started_at: Instant::now(),
    };

    // Build router with application routes (pass reference, not ownership!)
    let routes = api::routes(&state);

    // create_router adds docs/middleware/fallback to our composed routes
    let router = create_router::<openapi::ApiDoc>(routes).await?;

    // Merge the /health liveness endpoint into the app
    let app = router.merge(health_router(state.config.app));

    info!(
        "Starting {} v{} in {} mode",
        state.config.app.name, state.config.app.version, state.config.environment
    );

    // Production-ready server with graceful shutdown and cleanup
    let server_config = state.config.server.clone();
    let cleanup_client = state.client.clone();
    create_production_app(
        app,
        &server_config,
        Duration::from_secs(30), // 30s graceful shutdown timeout
        async move {
            info!("Shutting down: closing MongoDB connection");
            cleanup_client.shutdown().await;
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("User API shutdown complete");
    Ok(())
}
