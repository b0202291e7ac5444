//! Post CRUD handlers.

use std::future::Future;

use actix_web::{HttpResponse, web};

use blog_core::domain::{NewPost, PostChanges};
use blog_core::error::RepoError;
use blog_shared::MessageResponse;
use blog_shared::dto::{CreatePostRequest, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult, BODY_LIMIT, POST_NOT_FOUND};
use crate::state::AppState;

/// Await a repository call under the per-request deadline.
async fn with_deadline<T>(
    state: &AppState,
    call: impl Future<Output = Result<T, RepoError>>,
) -> AppResult<T> {
    match tokio::time::timeout(state.query_timeout, call).await {
        Ok(result) => result.map_err(AppError::from),
        Err(_) => {
            tracing::error!(timeout = ?state.query_timeout, "Database operation timed out");
            Err(AppError::Internal("database operation timed out".to_string()))
        }
    }
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = with_deadline(&state, state.posts.list()).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = with_deadline(&state, state.posts.find_by_id(id))
        .await?
        .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = NewPost::new(req.title, req.content, req.image_url);

    let created = with_deadline(&state, state.posts.insert(post)).await?;
    tracing::info!(post_id = created.id, "Post created");

    Ok(HttpResponse::Created().json(created))
}

/// PUT /api/posts/{id}
///
/// The stored row is loaded first and the body is decoded over it, so an
/// unknown id is reported before a malformed body. An empty body leaves
/// the post unchanged apart from `updated_at`.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let mut post = with_deadline(&state, state.posts.find_by_id(id))
        .await?
        .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))?;

    let body = match payload.to_bytes_limited(BODY_LIMIT).await {
        Ok(Ok(body)) => body,
        Ok(Err(_)) => {
            return Err(AppError::BadRequest(format!(
                "Request body is larger than allowed (limit: {BODY_LIMIT} bytes)"
            )));
        }
        Err(err) => return Err(AppError::BadRequest(err.to_string())),
    };

    let req: UpdatePostRequest = if body.iter().all(u8::is_ascii_whitespace) {
        UpdatePostRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest(e.to_string()))?
    };

    post.apply(PostChanges {
        title: req.title,
        content: req.content,
        image_url: req.image_url,
    });

    // The row may have been deleted between load and save
    let updated = with_deadline(&state, state.posts.update(post))
        .await?
        .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))?;
    tracing::info!(post_id = updated.id, "Post updated");

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/posts/{id}
///
/// Succeeds even when no row matched.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let removed = with_deadline(&state, state.posts.delete(id)).await?;
    tracing::info!(post_id = id, removed, "Post deleted");

    Ok(HttpResponse::Ok().json(MessageResponse::new("Post deleted successfully")))
}
