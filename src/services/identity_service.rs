use std::{fmt, sync::Arc};

use async_trait::async_trait;

use crate::{
    error::{AppError, Result},
    models::AuthTokens,
};

/// Failure reported by the identity provider. The message is the provider's
/// own text and is passed to callers unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    UserNotConfirmed(String),
    Rejected(String),
    Internal(String),
}

impl ProviderError {
    pub fn message(&self) -> &str {
        match self {
            ProviderError::UserNotConfirmed(msg)
            | ProviderError::Rejected(msg)
            | ProviderError::Internal(msg) => msg,
        }
    }

    fn into_app_error(self, rejected: fn(String) -> AppError) -> AppError {
        match self {
            ProviderError::Internal(msg) => AppError::InternalError(msg),
            other => rejected(other.message().to_string()),
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str, nickname: &str) -> ProviderResult<()>;

    async fn confirm_sign_up(&self, email: &str, code: &str) -> ProviderResult<()>;

    async fn resend_confirmation_code(&self, email: &str) -> ProviderResult<()>;

    /// `Ok(None)` when the provider accepted the call but returned no tokens.
    async fn initiate_auth(
        &self,
        email: &str,
        password: &str,
    ) -> ProviderResult<Option<AuthTokens>>;

    async fn admin_confirm_sign_up(&self, email: &str) -> ProviderResult<()>;

    async fn change_password(
        &self,
        access_token: &str,
        old_password: &str,
        new_password: &str,
    ) -> ProviderResult<()>;
}

pub struct IdentityGateway {
    provider: Arc<dyn IdentityProvider>,
}

impl IdentityGateway {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    pub async fn register(&self, email: &str, password: &str, nickname: &str) -> Result<()> {
        self.provider
            .sign_up(email, password, nickname)
            .await
            .map_err(|e| e.into_app_error(AppError::BadRequest))?;

        tracing::info!("Registered {}, confirmation code sent", email);
        Ok(())
    }

    pub async fn confirm(&self, email: &str, code: &str) -> Result<()> {
        self.provider
            .confirm_sign_up(email, code)
            .await
            .map_err(|e| e.into_app_error(AppError::BadRequest))?;

        tracing::info!("Confirmed {}", email);
        Ok(())
    }

    pub async fn resend(&self, email: &str) -> Result<()> {
        self.provider
            .resend_confirmation_code(email)
            .await
            .map_err(|e| e.into_app_error(AppError::BadRequest))
    }

    /// Exchanges credentials for tokens. An unconfirmed account is force
    /// confirmed and the exchange retried once.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens> {
        let outcome = match self.provider.initiate_auth(email, password).await {
            Err(ProviderError::UserNotConfirmed(_)) => {
                tracing::info!("Login for unconfirmed account {}, auto-confirming", email);

                if let Err(e) = self.provider.admin_confirm_sign_up(email).await {
                    tracing::warn!("Auto-confirm during login failed for {}: {}", email, e);
                    return Err(AppError::AutoConfirmFailed(e.message().to_string()));
                }

                self.provider.initiate_auth(email, password).await
            }
            other => other,
        };

        match outcome {
            Ok(Some(tokens)) => Ok(tokens),
            Ok(None) => Err(AppError::InternalError(
                "no authentication result".to_string(),
            )),
            Err(e) => Err(e.into_app_error(AppError::Unauthorized)),
        }
    }

    pub async fn change_password(
        &self,
        access_token: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        self.provider
            .change_password(access_token, old_password, new_password)
            .await
            .map_err(|e| e.into_app_error(AppError::BadRequest))
    }
}
