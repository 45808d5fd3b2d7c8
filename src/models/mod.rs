pub mod gallery;
pub mod media;

pub use gallery::{GalleryItem, MediaKind};
pub use media::MediaType;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// Form-encoded login request, as sent by the UI.
#[derive(Deserialize, ToSchema)]
pub struct LoginForm {
    /// Phone number registered with the Corpus API
    pub username: String,
    pub password: String,
}

/// JSON body the Corpus login endpoint expects.
#[derive(Serialize)]
pub struct CorpusCredentials<'a> {
    pub phone: &'a str,
    pub password: &'a str,
}

/// Documented shape of a successful login. The Corpus body is forwarded as-is.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Multipart body accepted by `POST /crafts`.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct CraftUploadForm {
    pub description: String,
    pub category_id: String,
    pub language: String,
    pub release_rights: String,
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct CraftUpload {
    pub description: String,
    pub category_id: String,
    pub language: String,
    pub release_rights: String,
    pub file: UploadedFile,
}

/// Field set sent to `records/upload`, one per upload attempt.
#[derive(Debug, Clone, Serialize)]
pub struct RecordSubmission {
    pub title: String,
    pub description: String,
    pub user_id: String,
    pub category_id: String,
    pub language: String,
    pub release_rights: String,
    pub media_type: MediaType,
    pub upload_uuid: Uuid,
    pub filename: String,
    pub total_chunks: u32,
}

impl RecordSubmission {
    /// Multi-chunk uploads are not supported.
    pub const SINGLE_CHUNK: u32 = 1;

    pub fn assemble(user_id: String, upload: &CraftUpload) -> Self {
        Self {
            title: upload.file.filename.clone(),
            description: upload.description.clone(),
            user_id,
            category_id: upload.category_id.clone(),
            language: upload.language.clone(),
            release_rights: upload.release_rights.clone(),
            media_type: MediaType::from_content_type(&upload.file.content_type),
            upload_uuid: Uuid::new_v4(),
            filename: upload.file.filename.clone(),
            total_chunks: Self::SINGLE_CHUNK,
        }
    }

    /// Text fields in the order the Corpus API documents them.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("user_id", self.user_id.clone()),
            ("category_id", self.category_id.clone()),
            ("language", self.language.clone()),
            ("release_rights", self.release_rights.clone()),
            ("media_type", self.media_type.to_string()),
            ("upload_uuid", self.upload_uuid.to_string()),
            ("filename", self.filename.clone()),
            ("total_chunks", self.total_chunks.to_string()),
        ]
    }
}

/// Pulls the user id out of an `auth/me` payload.
///
/// Only non-empty strings and non-zero numbers are ids; anything else
/// (missing, null, empty, booleans, `0`, objects, arrays) counts as absent.
pub fn user_id_from_identity(identity: &Value) -> Option<String> {
    match identity.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
