use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - represents a single blog article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post that has not been stored yet. The id and both timestamps are
/// assigned by the repository on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image_url: String,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image_url: image_url.into(),
        }
    }
}

/// Field-level changes merged over an existing post.
///
/// `None` leaves the stored value untouched. There is no way to express a
/// change to `id` or `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
}

impl Post {
    /// Merge `changes` into this post in place.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(image_url) = changes.image_url {
            self.image_url = image_url;
        }
    }

    /// Refresh `updated_at`. It never moves backwards.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Post {
        let now = Utc::now();
        Post {
            id: 7,
            title: "Initial title".to_string(),
            content: "Body".to_string(),
            image_url: "https://example.com/a.png".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_apply_overwrites_only_present_fields() {
        let mut post = sample();
        post.apply(PostChanges {
            title: Some("Renamed".to_string()),
            ..Default::default()
        });

        assert_eq!(post.title, "Renamed");
        assert_eq!(post.content, "Body");
        assert_eq!(post.image_url, "https://example.com/a.png");
        assert_eq!(post.id, 7);
    }

    #[test]
    fn test_apply_empty_changes_is_noop() {
        let mut post = sample();
        let before = post.clone();
        post.apply(PostChanges::default());
        assert_eq!(post, before);
    }

    #[test]
    fn test_touch_advances_updated_at() {
        let mut post = sample();
        let previous = post.updated_at - chrono::Duration::hours(1);
        post.updated_at = previous;

        post.touch();

        assert!(post.updated_at > previous);
        assert!(post.updated_at >= post.created_at);
    }

    #[test]
    fn test_touch_never_moves_backwards() {
        let mut post = sample();
        let ahead = Utc::now() + chrono::Duration::hours(1);
        post.updated_at = ahead;

        post.touch();

        assert_eq!(post.updated_at, ahead);
    }

    #[test]
    fn test_post_serializes_snake_case_fields() {
        let value = serde_json::to_value(sample()).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["image_url"], "https://example.com/a.png");
        assert!(value.get("created_at").is_some());
        assert!(value.get("updated_at").is_some());
    }
}
