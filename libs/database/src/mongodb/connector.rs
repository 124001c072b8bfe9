use mongodb::{Client, options::ClientOptions};
use std::time::Duration;
use tracing::{info, warn};

use super::MongoConfig;

/// Error type for MongoDB operations
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Retry policy for connection attempts: bounded exponential backoff.
#[derive(Clone, Copy, Debug)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5_000,
        }
    }
}

impl RetryConfig {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, initial_delay_ms: u64) -> Self {
        self.initial_delay_ms = initial_delay_ms;
        self
    }
}

/// Connect to MongoDB and return a [`Client`].
///
/// Verifies connectivity with a lightweight server round-trip before
/// returning.
pub async fn connect(url: &str) -> Result<Client, MongoError> {
    connect_from_config(&MongoConfig {
        url: url.to_string(),
        ..MongoConfig::default()
    })
    .await
}

/// Connect using a [`MongoConfig`].
///
/// This is the recommended entry point when configuration is loaded from the
/// environment.
pub async fn connect_from_config(config: &MongoConfig) -> Result<Client, MongoError> {
    info!("Attempting to connect to MongoDB at {}", config.url);

    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    // Verify connection by listing databases (lightweight ping)
    client
        .list_database_names()
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// Connect from config, retrying transient failures with exponential
/// backoff.
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    retry: Option<RetryConfig>,
) -> Result<Client, MongoError> {
    let retry = retry.unwrap_or_default();
    let mut delay = Duration::from_millis(retry.initial_delay_ms);
    let mut attempt = 0u32;

    loop {
        match connect_from_config(config).await {
            Ok(client) => return Ok(client),
            Err(e) if attempt < retry.max_retries => {
                attempt += 1;
                warn!(
                    "MongoDB connection attempt {}/{} failed: {}. Retrying in {:?}",
                    attempt, retry.max_retries, e, delay
                );
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(Duration::from_millis(retry.max_delay_ms));
            }
            Err(e) => return Err(e),
        }
    }
}
