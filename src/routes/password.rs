use axum::{Json, extract::State, http::HeaderMap};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{ChangePasswordRequest, MessageResponse},
    utils::extractors::{JsonBody, bearer_token, require_field},
};

pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<JsonBody<ChangePasswordRequest>, AppError>,
) -> Result<Json<MessageResponse>> {
    // A missing token wins over a malformed body.
    let access_token = bearer_token(&headers)?;
    let JsonBody(payload) = payload?;

    require_field(&payload.old_password, "old_password")?;
    require_field(&payload.new_password, "new_password")?;

    state
        .identity
        .change_password(access_token, &payload.old_password, &payload.new_password)
        .await?;

    Ok(Json(MessageResponse::new("password changed")))
}
