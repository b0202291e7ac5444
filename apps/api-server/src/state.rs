//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use blog_core::ports::PostRepository;
use blog_infra::database::{self, BootstrapError};
use blog_infra::{PostgresPostRepository, RetryPolicy};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub query_timeout: Duration,
}

impl AppState {
    pub fn new(posts: Arc<dyn PostRepository>, query_timeout: Duration) -> Self {
        Self {
            posts,
            query_timeout,
        }
    }

    /// Connect to the database with retry, synchronize the schema and build
    /// the state around the resulting pool.
    pub async fn bootstrap(config: &AppConfig) -> Result<Self, BootstrapError> {
        let db = database::connect_with_retry(&config.database, &RetryPolicy::default()).await?;

        database::sync_schema(&db).await?;
        tracing::info!("Schema synchronized");

        let posts: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(db));

        tracing::info!("Application state initialized");
        Ok(Self::new(posts, config.query_timeout))
    }
}
