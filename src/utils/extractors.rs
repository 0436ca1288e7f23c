use axum::{
    Json,
    extract::{FromRequest, Request},
    http::HeaderMap,
};
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, Result},
    utils::jwt::Claims,
};

/// JSON body extractor that reports any rejection as a plain 400.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Rejected request body: {}", e);
            AppError::BadRequest("invalid request".to_string())
        })?;

        Ok(Self(value))
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    headers
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("missing token".to_string()))
}

/// Picks the explicit user id, falling back to the token subject.
///
/// An explicit id wins over `sub`, so any gated caller can act on any
/// user's favourites.
pub fn resolve_user_id(explicit: Option<String>, claims: Option<&Claims>) -> Result<String> {
    explicit
        .filter(|id| !id.trim().is_empty())
        .or_else(|| claims.and_then(|c| c.sub.clone()))
        .ok_or_else(|| AppError::BadRequest("userId is required".to_string()))
}

pub fn require_field(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", name)));
    }
    Ok(())
}
