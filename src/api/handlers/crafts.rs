use crate::api::error::AppError;
use crate::api::middleware::auth::BearerToken;
use crate::models::{CraftUpload, GalleryItem, UploadedFile};
use axum::{
    Extension, Json,
    extract::{
        Multipart, State,
        multipart::{Field, MultipartError, MultipartRejection},
    },
    http::{StatusCode, header},
};
use serde_json::Value;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[utoipa::path(
    get,
    path = "/crafts",
    responses(
        (status = 200, description = "Public craft records, as returned by the Corpus API"),
        (status = 502, description = "Corpus API unreachable")
    ),
    tag = "crafts"
)]
pub async fn list_crafts(State(state): State<crate::AppState>) -> Result<Json<Value>, AppError> {
    let records = state.craft_service.list_crafts().await?;
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/crafts/gallery",
    responses(
        (status = 200, description = "Craft records mapped for display", body = [GalleryItem]),
        (status = 502, description = "Corpus API unreachable")
    ),
    tag = "crafts"
)]
pub async fn gallery(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<GalleryItem>>, AppError> {
    let items = state.craft_service.gallery().await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/crafts",
    request_body(content = crate::models::CraftUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Record created by the Corpus API"),
        (status = 400, description = "Missing or malformed form field"),
        (status = 401, description = "Missing or rejected bearer token"),
        (status = 403, description = "Token does not resolve to a user id"),
        (status = 413, description = "File too large")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "crafts"
)]
pub async fn upload_craft(
    State(state): State<crate::AppState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, AppError> {
    let upload = read_upload_form(multipart?).await?;
    let record = state.craft_service.upload_craft(&token, upload).await?;
    Ok(Json(record))
}

async fn read_upload_form(mut multipart: Multipart) -> Result<CraftUpload, AppError> {
    let mut description = None;
    let mut category_id = None;
    let mut language = None;
    let mut release_rights = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => file = Some(read_file(field).await?),
            "description" => description = Some(read_text(field).await?),
            "category_id" => category_id = Some(read_text(field).await?),
            "language" => language = Some(read_text(field).await?),
            "release_rights" => release_rights = Some(read_text(field).await?),
            _ => {}
        }
    }

    Ok(CraftUpload {
        description: required(description, "description")?,
        category_id: required(category_id, "category_id")?,
        language: required(language, "language")?,
        release_rights: required(release_rights, "release_rights")?,
        file: file.ok_or(AppError::BadRequest("No file provided".to_string()))?,
    })
}

async fn read_file(field: Field<'_>) -> Result<UploadedFile, AppError> {
    let filename = field.file_name().unwrap_or("unnamed").to_string();
    // The raw header, since the parsed accessor silently drops malformed types
    let content_type = match field.headers().get(header::CONTENT_TYPE) {
        Some(value) => value
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid content type".to_string()))?
            .trim()
            .to_string(),
        None => DEFAULT_CONTENT_TYPE.to_string(),
    };

    content_type
        .parse::<mime::Mime>()
        .map_err(|_| AppError::BadRequest(format!("Invalid content type: {}", content_type)))?;

    let data = field.bytes().await.map_err(multipart_error)?;

    Ok(UploadedFile {
        filename,
        content_type,
        data,
    })
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field.text().await.map_err(multipart_error)
}

fn required(value: Option<String>, name: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::BadRequest(format!("Missing form field: {}", name)))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Request body exceeds the maximum allowed limit".to_string())
    } else {
        AppError::BadRequest(e.body_text())
    }
}
