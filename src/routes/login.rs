use axum::{Json, extract::State};

use crate::{
    AppState,
    error::Result,
    models::{AuthTokens, LoginRequest},
    utils::extractors::{JsonBody, require_field},
};

pub async fn login_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<AuthTokens>> {
    require_field(&payload.email, "email")?;
    require_field(&payload.password, "password")?;

    let tokens = state.identity.login(&payload.email, &payload.password).await?;

    Ok(Json(tokens))
}
