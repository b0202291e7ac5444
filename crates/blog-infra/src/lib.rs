//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`: database
//! bootstrap with retry, schema synchronization, repositories and the seeder.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL support via SeaORM
//!
//! Without `postgres` only the in-memory repository and the seeder remain.

pub mod database;
pub mod memory;
pub mod seed;

// Re-exports
pub use database::{DatabaseConfig, RetryPolicy};
pub use memory::InMemoryPostRepository;
pub use seed::{SeedOutcome, seed};

#[cfg(feature = "postgres")]
pub use database::{BootstrapError, PostgresPostRepository};
