use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Fallbacks used by the migration utility when a variable is unset.
const DEFAULT_USER: &str = "blog_user";
const DEFAULT_PASSWORD: &str = "blog_password";
const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: &str = "5432";
const DEFAULT_NAME: &str = "blog_db";

const DEFAULT_MAX_CONNECTIONS: u32 = 100;
const DEFAULT_MIN_CONNECTIONS: u32 = 10;

/// Configuration for the blog database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: String,
    pub name: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Load the server configuration. Connection variables have no
    /// defaults: an unset variable stays empty and the resulting URL will
    /// fail to connect.
    pub fn from_env() -> Self {
        Self::load(|key| std::env::var(key).ok(), false)
    }

    /// Load the migration utility configuration, falling back to local
    /// development defaults for unset or empty variables.
    pub fn from_env_with_defaults() -> Self {
        Self::load(|key| std::env::var(key).ok(), true)
    }

    fn load<F>(lookup: F, use_defaults: bool) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            let value = lookup(key).filter(|v| !v.is_empty());
            match value {
                Some(value) => value,
                None if use_defaults => default.to_string(),
                None => String::new(),
            }
        };

        Self {
            user: var("DB_USER", DEFAULT_USER),
            password: var("DB_PASSWORD", DEFAULT_PASSWORD),
            host: var("DB_HOST", DEFAULT_HOST),
            port: var("DB_PORT", DEFAULT_PORT),
            name: var("DB_NAME", DEFAULT_NAME),
            max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            min_connections: lookup("DB_MIN_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MIN_CONNECTIONS),
            connect_timeout: Duration::from_secs(10),
            acquire_timeout: Duration::from_secs(10),
        }
    }

    /// PostgreSQL connection URL. User and password are percent-encoded.
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            self.name,
        )
    }

    /// Connection URL safe for logs.
    pub fn redacted_url(&self) -> String {
        format!(
            "postgres://{}:***@{}:{}/{}",
            urlencoding::encode(&self.user),
            self.host,
            self.port,
            self.name,
        )
    }
}

/// Bounded retry with a fixed delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay: Duration::from_secs(2),
        }
    }
}

/// Run `op` until it succeeds or `policy.max_attempts` calls have failed.
///
/// `op` receives the 1-based attempt number. The delay is only slept
/// between attempts, never after the last one. On exhaustion the error
/// of the final attempt is returned.
pub async fn retry_fixed<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %err,
                    "Attempt {}/{} failed. Retrying in {:?}...",
                    attempt,
                    max_attempts,
                    policy.delay
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Startup failures while preparing the database.
#[cfg(feature = "postgres")]
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("failed to connect to database: {0}")]
    Connect(#[source] DbErr),

    #[error("failed to connect to database after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: DbErr,
    },

    #[error("failed to migrate database: {0}")]
    Schema(#[source] DbErr),
}

/// Open a pooled connection with a single attempt.
#[cfg(feature = "postgres")]
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, BootstrapError> {
    open(config).await.map_err(BootstrapError::Connect)
}

/// Open a pooled connection, retrying transient failures per `policy`.
#[cfg(feature = "postgres")]
pub async fn connect_with_retry(
    config: &DatabaseConfig,
    policy: &RetryPolicy,
) -> Result<DatabaseConnection, BootstrapError> {
    retry_fixed(policy, |_| async move { open(config).await })
        .await
        .map_err(|source| BootstrapError::Exhausted {
            attempts: policy.max_attempts.max(1),
            source,
        })
}

#[cfg(feature = "postgres")]
async fn open(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    tracing::info!(url = %config.redacted_url(), "Connecting to database...");

    let opts = ConnectOptions::new(config.connection_url())
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    let db = Database::connect(opts).await?;
    tracing::info!(
        "Database connected (pool: {}-{})",
        config.min_connections,
        config.max_connections
    );

    Ok(db)
}
