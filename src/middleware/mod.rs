use axum::{extract::Request, middleware::Next, response::Response};

use crate::{
    error::AppError,
    utils::{extractors::bearer_token, jwt},
};

/// Admits requests carrying a structurally valid ID or access token and
/// exposes its claims to handlers. The signature is NOT verified.
pub async fn token_gate(mut req: Request, next: Next) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())?;
    let claims = jwt::parse_unverified(token)?;

    if !claims.is_id_or_access() {
        return Err(AppError::Unauthorized("invalid token type".to_string()));
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
