use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

const VIDEO_EXTENSIONS: [&str; 3] = [".mp4", ".mov", ".avi"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Image,
    None,
}

/// Display projection of one Corpus record.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GalleryItem {
    pub title: String,
    pub description: String,
    pub author: String,
    pub media_url: Option<String>,
    pub media_kind: MediaKind,
}

impl GalleryItem {
    pub fn from_record(record: &Value) -> Self {
        let title = text_or(record.get("title"), "Untitled Craft");
        let description = text_or(record.get("description"), "No description provided.");
        let author = text_or(
            record.get("user").and_then(|u| u.get("name")),
            "Unknown Artist",
        );
        let media_url = record
            .get("file_url")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let media_kind = match media_url.as_deref() {
            Some(url) if VIDEO_EXTENSIONS.iter().any(|ext| url.contains(ext)) => MediaKind::Video,
            Some(_) => MediaKind::Image,
            None => MediaKind::None,
        };

        Self {
            title,
            description,
            author,
            media_url,
            media_kind,
        }
    }
}

fn text_or(value: Option<&Value>, fallback: &str) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string()
}
