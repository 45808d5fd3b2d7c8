use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Media classification the Corpus API expects on every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Audio,
    Image,
    Text,
}

impl MediaType {
    /// Classifies a declared content type by ordered substring checks.
    ///
    /// The first match wins: "video", then "audio", then "image" or "pdf".
    /// Anything else is text.
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.contains("video") {
            MediaType::Video
        } else if content_type.contains("audio") {
            MediaType::Audio
        } else if content_type.contains("image") || content_type.contains("pdf") {
            MediaType::Image
        } else {
            MediaType::Text
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Video => "video",
            MediaType::Audio => "audio",
            MediaType::Image => "image",
            MediaType::Text => "text",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
