//! # Blog API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present; reported once tracing is up
    let dotenv = dotenvy::dotenv();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(err) if err.not_found() => tracing::info!("No .env file found"),
        Err(err) => tracing::warn!(error = %err, "Failed to load .env file"),
    }

    let config = AppConfig::from_env();

    // No traffic is accepted until the database is ready
    let state = match AppState::bootstrap(&config).await {
        Ok(state) => state,
        Err(err) => {
            tracing::error!(error = %err, "Database bootstrap failed");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Starting Blog API Server on {}:{}",
        config.host,
        config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
            .default_service(web::to(handlers::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
