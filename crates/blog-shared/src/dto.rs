//! Data Transfer Objects - request bodies accepted by the API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/posts`.
///
/// Only `title` is required. Any `id` or timestamp sent by the client is
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: String,
}

/// Body of `PUT /api/posts/{id}`.
///
/// Omitted (or `null`) fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_only_title() {
        let req: CreatePostRequest =
            serde_json::from_str(r#"{"title":"T","id":99,"created_at":"2020-01-01T00:00:00Z"}"#)
                .unwrap();

        assert_eq!(req.title, "T");
        assert_eq!(req.content, "");
        assert_eq!(req.image_url, "");
    }

    #[test]
    fn test_create_without_title_is_rejected() {
        let err = serde_json::from_str::<CreatePostRequest>(r#"{"content":"C"}"#).unwrap_err();

        assert!(err.to_string().contains("missing field `title`"));
    }

    #[test]
    fn test_update_accepts_partial_body() {
        let req: UpdatePostRequest = serde_json::from_str(r#"{"content":"new"}"#).unwrap();

        assert_eq!(req.title, None);
        assert_eq!(req.content.as_deref(), Some("new"));
        assert_eq!(req.image_url, None);
    }
}
