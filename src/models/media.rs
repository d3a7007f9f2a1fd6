//! Media model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::ApiClient;
use crate::error::Result;
use crate::traits::List;

/// A media record attached to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    /// Numeric media ID.
    pub id: u64,

    /// Owning project.
    pub project_id: u64,

    /// Original file name.
    pub filename: String,

    /// MIME type (e.g. "image/jpeg").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Where the file can be fetched from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Pixel width, for images and video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Pixel height, for images and video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Upload time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Server fields this struct does not model, kept as sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Media {
    /// Path of the media collection endpoint for a project.
    pub fn collection_path(project_id: u64) -> String {
        format!("api/v1/projects/{project_id}/media")
    }

    /// Whether the record is an image, judged by its MIME type.
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|t| t.starts_with("image/"))
    }

    /// `WIDTHxHEIGHT`, when both are known.
    pub fn dimensions(&self) -> Option<String> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(format!("{w}x{h}")),
            _ => None,
        }
    }
}

#[async_trait]
impl List for Media {
    type Scope = u64; // Project ID

    #[tracing::instrument(skip(client))]
    async fn list(client: &ApiClient, project_id: &u64) -> Result<Option<Vec<Self>>> {
        client.get_json(&Self::collection_path(*project_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(content_type: Option<&str>) -> Media {
        Media {
            id: 1,
            project_id: 42,
            filename: "dawn.jpg".to_string(),
            content_type: content_type.map(str::to_string),
            url: None,
            size: None,
            width: Some(1920),
            height: Some(1080),
            created_at: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_media_is_image() {
        assert!(sample(Some("image/jpeg")).is_image());
        assert!(!sample(Some("video/mp4")).is_image());
        assert!(!sample(None).is_image());
    }

    #[test]
    fn test_media_dimensions() {
        assert_eq!(sample(None).dimensions().as_deref(), Some("1920x1080"));
        let mut media = sample(None);
        media.height = None;
        assert!(media.dimensions().is_none());
    }

    #[test]
    fn test_media_serializes_as_received() {
        let sent = serde_json::json!({
            "id": 1,
            "project_id": 42,
            "filename": "a.jpg",
            "thumbnail": "t.jpg"
        });
        let media: Media = serde_json::from_value(sent.clone()).unwrap();
        assert_eq!(media.extra.get("thumbnail"), Some(&Value::from("t.jpg")));
        assert_eq!(serde_json::to_value(&media).unwrap(), sent);
    }

    #[test]
    fn test_collection_path() {
        assert_eq!(Media::collection_path(42), "api/v1/projects/42/media");
    }
}
