use async_trait::async_trait;

use crate::domain::{NewPost, Post};
use crate::error::RepoError;

/// Storage operations for posts.
///
/// Implementations must be safe to share across concurrently running
/// requests; the server holds a single instance behind an `Arc`.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest `created_at` first. Equal timestamps are ordered
    /// by descending id.
    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Insert a new post, returning it with its assigned id and timestamps.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Persist every mutable field of `post` and refresh `updated_at`.
    ///
    /// Returns `None` when no row with `post.id` exists anymore.
    async fn update(&self, post: Post) -> Result<Option<Post>, RepoError>;

    /// Delete a post by id, returning the number of rows removed.
    async fn delete(&self, id: i64) -> Result<u64, RepoError>;

    /// Number of stored posts.
    async fn count(&self) -> Result<u64, RepoError>;
}
