//! Database connection management, schema and persistence.

mod connections;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_repo;
#[cfg(feature = "postgres")]
mod schema;

pub use connections::{DatabaseConfig, RetryPolicy, retry_fixed};

#[cfg(feature = "postgres")]
pub use connections::{BootstrapError, connect, connect_with_retry};
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresPostRepository;
#[cfg(feature = "postgres")]
pub use schema::{create_table_statement, created_at_index_statement, sync_schema};
