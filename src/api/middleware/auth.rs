use crate::api::error::AppError;
use axum::{extract::Request, middleware::Next, response::Response};

/// Bearer token presented by the caller. Validation is left to the Corpus API.
#[derive(Clone, Debug)]
pub struct BearerToken(pub String);

pub async fn auth_middleware(mut req: Request, next: Next) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string());

    match token {
        Some(token) => {
            req.extensions_mut().insert(BearerToken(token));
            Ok(next.run(req).await)
        }
        None => Err(AppError::AuthenticationFailed(
            "Not authenticated".to_string(),
        )),
    }
}
