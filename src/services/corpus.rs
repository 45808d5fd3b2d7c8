use crate::config::ProxyConfig;
use crate::models::{CorpusCredentials, RecordSubmission, UploadedFile};
use async_trait::async_trait;
use reqwest::{
    Body, Client, Response, StatusCode,
    multipart::{Form, Part},
};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const LOGIN_PATH: &str = "/api/v1/auth/login";
const ME_PATH: &str = "/api/v1/auth/me";
const RECORDS_PATH: &str = "/api/v1/records/";
const UPLOAD_PATH: &str = "/api/v1/records/upload";

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Corpus API responded with {status}")]
    Status { status: StatusCode, body: String },

    #[error("Corpus API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The subset of the external Corpus API this service forwards to.
#[async_trait]
pub trait CorpusApi: Send + Sync {
    /// Exchange a phone/password pair for a bearer token payload
    async fn login(&self, phone: &str, password: &str) -> Result<Value, CorpusError>;

    /// Identity of the token holder
    async fn current_user(&self, token: &str) -> Result<Value, CorpusError>;

    /// Public records collection
    async fn list_records(&self) -> Result<Value, CorpusError>;

    /// Single-chunk record upload
    async fn upload_record(
        &self,
        token: &str,
        submission: &RecordSubmission,
        file: &UploadedFile,
    ) -> Result<Value, CorpusError>;
}

pub struct HttpCorpusClient {
    http: Client,
    base_url: String,
    request_timeout: Duration,
    upload_timeout: Duration,
}

impl HttpCorpusClient {
    pub fn new(config: &ProxyConfig) -> Result<Self, CorpusError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: config.corpus_api_base_url.clone(),
            request_timeout: config.request_timeout(),
            upload_timeout: config.upload_timeout(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json(response: Response) -> Result<Value, CorpusError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CorpusError::Status { status, body });
        }
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl CorpusApi for HttpCorpusClient {
    async fn login(&self, phone: &str, password: &str) -> Result<Value, CorpusError> {
        let response = self
            .http
            .post(self.url(LOGIN_PATH))
            .timeout(self.request_timeout)
            .json(&CorpusCredentials { phone, password })
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn current_user(&self, token: &str) -> Result<Value, CorpusError> {
        let response = self
            .http
            .get(self.url(ME_PATH))
            .timeout(self.request_timeout)
            .bearer_auth(token)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn list_records(&self) -> Result<Value, CorpusError> {
        let response = self
            .http
            .get(self.url(RECORDS_PATH))
            .timeout(self.request_timeout)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn upload_record(
        &self,
        token: &str,
        submission: &RecordSubmission,
        file: &UploadedFile,
    ) -> Result<Value, CorpusError> {
        // Bytes clone is a refcount bump, the upload is never copied
        let file_part =
            Part::stream_with_length(Body::from(file.data.clone()), file.data.len() as u64)
                .file_name(file.filename.clone())
                .mime_str(&file.content_type)?;

        let form = submission
            .fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value))
            .part("file", file_part);

        let response = self
            .http
            .post(self.url(UPLOAD_PATH))
            .timeout(self.upload_timeout)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        Self::read_json(response).await
    }
}
