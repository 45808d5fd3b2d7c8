use crate::api::error::AppError;
use crate::models::LoginForm;
use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
};
use serde_json::Value;

#[utoipa::path(
    post,
    path = "/token",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful", body = crate::models::TokenResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Incorrect username or password")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<crate::AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<Value>, AppError> {
    let Form(form) = form?;
    let token = state
        .craft_service
        .login(&form.username, &form.password)
        .await?;

    Ok(Json(token))
}
