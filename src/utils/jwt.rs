use std::collections::HashMap;

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Claims carried by identity-provider ID and access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    /// Kept untyped so a non-string value reads as a wrong token type.
    #[serde(default)]
    pub token_use: Option<serde_json::Value>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    pub fn is_id_or_access(&self) -> bool {
        matches!(
            self.token_use.as_ref().and_then(|v| v.as_str()),
            Some("id") | Some("access")
        )
    }
}

/// Decodes the token payload WITHOUT checking its signature, expiry or
/// audience. Anyone can mint a token this accepts.
pub fn parse_unverified(token: &str) -> Result<Claims> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!("Token parse failed: {}", e);
            AppError::Unauthorized("invalid token".to_string())
        })
}
