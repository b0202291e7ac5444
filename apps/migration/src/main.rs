//! Migration CLI tool.
//!
//! Connects once (no retry), synchronizes the `posts` schema and seeds the
//! sample posts into an empty table.

use anyhow::Context;
use blog_infra::database::{self, DatabaseConfig};
use blog_infra::{PostgresPostRepository, SeedOutcome};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);
    if json_logs {
        tracing_subscriber::fmt().with_env_filter(env_filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    match dotenv {
        Ok(_) => {}
        Err(err) if err.not_found() => {
            tracing::info!("No .env file found, using environment variables");
        }
        Err(err) => tracing::warn!(error = %err, "Failed to load .env file"),
    }

    if let Err(err) = run().await {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = DatabaseConfig::from_env_with_defaults();
    let db = database::connect(&config).await?;

    tracing::info!("Running migrations...");
    database::sync_schema(&db).await?;
    tracing::info!("Migrations completed successfully");

    tracing::info!("Seeding data...");
    let repo = PostgresPostRepository::new(db);
    match blog_infra::seed(&repo).await.context("Failed to seed data")? {
        SeedOutcome::Seeded { inserted } => tracing::info!(inserted, "Inserted sample posts"),
        SeedOutcome::AlreadySeeded { existing } => {
            tracing::info!(existing, "Table already contains posts, nothing to seed")
        }
    }
    tracing::info!("Data seeding completed successfully");

    Ok(())
}
