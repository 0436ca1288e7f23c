use axum::{Json, extract::State};

use crate::{
    AppState,
    error::Result,
    models::{ConfirmRequest, MessageResponse, RegisterRequest, ResendConfirmRequest},
    utils::extractors::{JsonBody, require_field},
};

pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<Json<MessageResponse>> {
    require_field(&payload.email, "email")?;
    require_field(&payload.password, "password")?;

    state
        .identity
        .register(&payload.email, &payload.password, &payload.nickname)
        .await?;

    Ok(Json(MessageResponse::new(
        "registered, check your email for confirmation code",
    )))
}

pub async fn confirm_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ConfirmRequest>,
) -> Result<Json<MessageResponse>> {
    require_field(&payload.email, "email")?;
    require_field(&payload.code, "code")?;

    state.identity.confirm(&payload.email, &payload.code).await?;

    Ok(Json(MessageResponse::new("confirmed")))
}

pub async fn resend_confirmation(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ResendConfirmRequest>,
) -> Result<Json<MessageResponse>> {
    require_field(&payload.email, "email")?;

    state.identity.resend(&payload.email).await?;

    tracing::info!("Confirmation code resent to {}", payload.email);

    Ok(Json(MessageResponse::new("code resent")))
}
