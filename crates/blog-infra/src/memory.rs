//! In-memory post repository - used when no database is attached.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use blog_core::domain::{NewPost, Post};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

#[derive(Default)]
struct Store {
    posts: BTreeMap<i64, Post>,
    last_id: i64,
}

/// In-memory post repository using a `BTreeMap` behind an async `RwLock`.
///
/// Ids are assigned sequentially from 1 and never reused.
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.posts.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.posts.get(&id).cloned())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        store.last_id += 1;

        let now = Utc::now();
        let post = Post {
            id: store.last_id,
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            created_at: now,
            updated_at: now,
        };

        store.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        let Some(stored) = store.posts.get_mut(&post.id) else {
            return Ok(None);
        };

        stored.title = post.title;
        stored.content = post.content;
        stored.image_url = post.image_url;
        stored.touch();

        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: i64) -> Result<u64, RepoError> {
        let removed = self.store.write().await.posts.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.store.read().await.posts.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryPostRepository::new();
        let first = repo.insert(NewPost::new("A", "", "")).await.unwrap();
        let second = repo.insert(NewPost::new("B", "", "")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = InMemoryPostRepository::new();
        for title in ["one", "two", "three"] {
            repo.insert(NewPost::new(title, "", "")).await.unwrap();
        }

        let posts = repo.list().await.unwrap();
        assert_eq!(posts.len(), 3);
        assert!(posts.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(posts[0].title, "three");
    }

    #[tokio::test]
    async fn test_update_keeps_identity_and_creation_time() {
        let repo = InMemoryPostRepository::new();
        let created = repo.insert(NewPost::new("A", "body", "")).await.unwrap();

        let mut changed = created.clone();
        changed.title = "B".to_string();
        changed.created_at = Utc::now() + chrono::Duration::days(1);

        let updated = repo.update(changed).await.unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "B");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = InMemoryPostRepository::new();
        let created = repo.insert(NewPost::new("A", "", "")).await.unwrap();
        repo.delete(created.id).await.unwrap();

        assert!(repo.update(created).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_counts_removed_rows() {
        let repo = InMemoryPostRepository::new();
        let created = repo.insert(NewPost::new("A", "", "")).await.unwrap();

        assert_eq!(repo.delete(created.id).await.unwrap(), 1);
        assert_eq!(repo.delete(created.id).await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
