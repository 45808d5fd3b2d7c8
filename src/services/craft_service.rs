use crate::api::error::AppError;
use crate::models::{CraftUpload, GalleryItem, RecordSubmission, user_id_from_identity};
use crate::services::corpus::{CorpusApi, CorpusError};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Forwards craft operations to the Corpus API and normalizes its failures.
pub struct CraftService {
    corpus: Arc<dyn CorpusApi>,
}

impl CraftService {
    pub fn new(corpus: Arc<dyn CorpusApi>) -> Self {
        Self { corpus }
    }

    /// Any rejection collapses into one generic 401 so callers cannot tell
    /// a wrong phone number from a wrong password.
    pub async fn login(&self, username: &str, password: &str) -> Result<Value, AppError> {
        self.corpus
            .login(username, password)
            .await
            .map_err(|e| match e {
                CorpusError::Status { status, .. } => {
                    warn!("Corpus login rejected with status {}", status);
                    AppError::AuthenticationFailed("Incorrect username or password".to_string())
                }
                CorpusError::Transport(e) => gateway(e),
            })
    }

    pub async fn list_crafts(&self) -> Result<Value, AppError> {
        self.corpus.list_records().await.map_err(|e| match e {
            CorpusError::Status { status, body } => {
                warn!("Corpus records fetch failed with {}: {}", status, body);
                AppError::FetchFailed(status)
            }
            CorpusError::Transport(e) => gateway(e),
        })
    }

    pub async fn gallery(&self) -> Result<Vec<GalleryItem>, AppError> {
        let records = self.list_crafts().await?;
        match records.as_array() {
            Some(items) => Ok(items.iter().map(GalleryItem::from_record).collect()),
            None => {
                warn!("Corpus records payload is not a list; rendering an empty gallery");
                Ok(Vec::new())
            }
        }
    }

    pub async fn upload_craft(&self, token: &str, upload: CraftUpload) -> Result<Value, AppError> {
        // 1. Resolve who is uploading
        let identity = self.corpus.current_user(token).await.map_err(|e| match e {
            CorpusError::Status { status, .. } => {
                warn!("Corpus identity lookup rejected with status {}", status);
                AppError::AuthenticationFailed(
                    "Could not validate token with Corpus API".to_string(),
                )
            }
            CorpusError::Transport(e) => gateway(e),
        })?;

        let user_id = user_id_from_identity(&identity).ok_or(AppError::IdentityUnresolvable)?;

        // 2. Classify and assemble
        let submission = RecordSubmission::assemble(user_id, &upload);
        info!(
            upload_uuid = %submission.upload_uuid,
            media_type = %submission.media_type,
            size = upload.file.data.len(),
            "Forwarding craft upload to Corpus API"
        );

        // 3. Forward
        self.corpus
            .upload_record(token, &submission, &upload.file)
            .await
            .map_err(|e| match e {
                CorpusError::Status { status, body } => {
                    warn!(
                        upload_uuid = %submission.upload_uuid,
                        "Corpus upload failed with status {}",
                        status
                    );
                    AppError::UploadFailed {
                        status,
                        detail: body,
                    }
                }
                CorpusError::Transport(e) => gateway(e),
            })
    }
}

fn gateway(e: reqwest::Error) -> AppError {
    error!("Corpus API transport error: {:?}", e);
    AppError::BadGateway(e.to_string())
}
