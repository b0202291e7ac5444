//! Health check endpoint.

use actix_web::HttpResponse;
use blog_shared::HealthResponse;

/// Liveness probe. Never touches the database.
///
/// GET /
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::ok())
}
