use axum::{
    Json,
    extract::rejection::FormRejection,
    extract::multipart::MultipartRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub const IDENTITY_UNRESOLVABLE: &str = "Could not determine user ID for upload.";
pub const FETCH_FAILED: &str = "Could not fetch crafts from Corpus API.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Identity unresolvable")]
    IdentityUnresolvable,

    #[error("Fetch failed with upstream status {0}")]
    FetchFailed(StatusCode),

    #[error("Upload failed with upstream status {status}: {detail}")]
    UploadFailed { status: StatusCode, detail: String },

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),

    #[error("Bad Gateway: {0}")]
    BadGateway(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            AppError::IdentityUnresolvable => StatusCode::FORBIDDEN,
            AppError::FetchFailed(status) => *status,
            AppError::UploadFailed { status, .. } => *status,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::AuthenticationFailed(msg) => msg,
            AppError::IdentityUnresolvable => IDENTITY_UNRESOLVABLE.to_string(),
            AppError::FetchFailed(_) => FETCH_FAILED.to_string(),
            AppError::UploadFailed { detail, .. } => {
                format!("Corpus API upload failed: {}", detail)
            }
            AppError::BadRequest(msg) => msg,
            AppError::PayloadTooLarge(msg) => msg,
            AppError::BadGateway(msg) => {
                tracing::error!("Upstream error: {}", msg);
                "Corpus API is unreachable".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal Server Error".to_string()
            }
        };

        let body = Json(json!({
            "detail": message
        }));

        (status, body).into_response()
    }
}
