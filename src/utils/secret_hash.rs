use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{AppError, Result};

type HmacSha256 = Hmac<Sha256>;

/// `base64(HMAC-SHA256(client_secret, username + client_id))`, required by
/// identity-provider app clients that have a secret.
pub fn compute_secret_hash(username: &str, client_id: &str, client_secret: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(client_secret.as_bytes())
        .map_err(|e| AppError::ConfigError(format!("Invalid client secret: {}", e)))?;
    mac.update(username.as_bytes());
    mac.update(client_id.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
