//! Initial data for an empty `posts` table.

use blog_core::domain::NewPost;
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

/// Result of a [`seed`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The table already held rows; nothing was inserted.
    AlreadySeeded { existing: u64 },
    /// The table was empty and the samples were inserted.
    Seeded { inserted: usize },
}

/// The sample posts, in insertion order.
pub fn sample_posts() -> Vec<NewPost> {
    vec![
        NewPost::new(
            "Getting Started with Backend Development in Rust",
            "Rust is a fast, memory-safe language well suited to backend services. \
             Its ownership model and async ecosystem make it a strong fit for building web applications.",
            "https://images.unsplash.com/photo-1587620962725-abab7fe55159?w=800",
        ),
        NewPost::new(
            "Modern Frontends with Next.js",
            "Next.js is a React framework with server-side rendering and static site generation. \
             It lets you build fast web applications that are friendly to search engines.",
            "https://images.unsplash.com/photo-1633356122544-f134324a6cee?w=800",
        ),
        NewPost::new(
            "Consistent Development Environments with Docker",
            "Docker makes development environments easy to build and share. \
             Containers let the same application run identically on every machine.",
            "https://images.unsplash.com/photo-1605745341112-85968b19335b?w=800",
        ),
        NewPost::new(
            "PostgreSQL Fundamentals",
            "PostgreSQL is an open-source relational database used all over the world. \
             Its reliability and performance make it a solid home for application data.",
            "https://images.unsplash.com/photo-1544383835-bda2bc66a55d?w=800",
        ),
        NewPost::new(
            "Principles of REST API Design",
            "RESTful APIs use HTTP methods deliberately and model the domain as resources. \
             Choosing between GET, POST, PUT and DELETE carefully yields intuitive, easy-to-use APIs.",
            "https://images.unsplash.com/photo-1558494949-ef010cbdcc31?w=800",
        ),
    ]
}

/// Insert [`sample_posts`] if the repository is empty.
///
/// Stops at the first failed insert and returns its error. Rows inserted
/// before the failure are kept.
pub async fn seed(repo: &dyn PostRepository) -> Result<SeedOutcome, RepoError> {
    let existing = repo.count().await?;
    if existing > 0 {
        tracing::info!(existing, "Posts already present, skipping seed");
        return Ok(SeedOutcome::AlreadySeeded { existing });
    }

    let posts = sample_posts();
    let inserted = posts.len();
    for post in posts {
        let stored = repo.insert(post).await?;
        tracing::debug!(post_id = stored.id, title = %stored.title, "Seeded post");
    }

    Ok(SeedOutcome::Seeded { inserted })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use blog_core::domain::Post;

    use super::*;
    use crate::memory::InMemoryPostRepository;

    #[tokio::test]
    async fn test_seed_empty_table_inserts_samples() {
        let repo = InMemoryPostRepository::new();

        let outcome = seed(&repo).await.unwrap();

        assert_eq!(outcome, SeedOutcome::Seeded { inserted: 5 });
        assert_eq!(repo.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let repo = InMemoryPostRepository::new();
        seed(&repo).await.unwrap();

        let outcome = seed(&repo).await.unwrap();

        assert_eq!(outcome, SeedOutcome::AlreadySeeded { existing: 5 });
        assert_eq!(repo.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_seed_skips_table_with_user_rows() {
        let repo = InMemoryPostRepository::new();
        repo.insert(NewPost::new("Mine", "", "")).await.unwrap();

        let outcome = seed(&repo).await.unwrap();

        assert_eq!(outcome, SeedOutcome::AlreadySeeded { existing: 1 });
    }

    /// Fails every insert after the first `allowed`.
    struct FailingAfter {
        inner: InMemoryPostRepository,
        allowed: usize,
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl PostRepository for FailingAfter {
        async fn list(&self) -> Result<Vec<Post>, RepoError> {
            self.inner.list().await
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
            self.inner.find_by_id(id).await
        }

        async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
            if self.attempts.fetch_add(1, Ordering::SeqCst) >= self.allowed {
                return Err(RepoError::Query("value too long".to_string()));
            }
            self.inner.insert(post).await
        }

        async fn update(&self, post: Post) -> Result<Option<Post>, RepoError> {
            self.inner.update(post).await
        }

        async fn delete(&self, id: i64) -> Result<u64, RepoError> {
            self.inner.delete(id).await
        }

        async fn count(&self) -> Result<u64, RepoError> {
            self.inner.count().await
        }
    }

    #[tokio::test]
    async fn test_seed_stops_at_first_failure_without_rollback() {
        let repo = FailingAfter {
            inner: InMemoryPostRepository::new(),
            allowed: 2,
            attempts: AtomicUsize::new(0),
        };

        let err = seed(&repo).await.unwrap_err();

        assert!(matches!(err, RepoError::Query(_)));
        assert_eq!(repo.attempts.load(Ordering::SeqCst), 3);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[test]
    fn test_sample_image_urls_fit_column() {
        assert!(sample_posts().iter().all(|p| p.image_url.len() <= 500));
    }
}
