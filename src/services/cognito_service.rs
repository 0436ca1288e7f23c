use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::{
    Client as CognitoClient,
    error::{DisplayErrorContext, SdkError},
    types::{AttributeType, AuthFlowType},
};

use crate::{
    config::CognitoConfig,
    models::AuthTokens,
    services::identity_service::{IdentityProvider, ProviderError, ProviderResult},
    utils::secret_hash::compute_secret_hash,
};

pub struct CognitoIdentityProvider {
    client: CognitoClient,
    config: CognitoConfig,
}

impl CognitoIdentityProvider {
    pub fn new(client: CognitoClient, config: CognitoConfig) -> Self {
        tracing::info!("Cognito client initialized for pool {}", config.user_pool_id);

        Self { client, config }
    }

    fn secret_hash(&self, username: &str) -> ProviderResult<String> {
        compute_secret_hash(username, &self.config.client_id, &self.config.client_secret)
            .map_err(|e| ProviderError::Internal(e.to_string()))
    }
}

fn describe<E, R>(err: &SdkError<E, R>) -> String
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err.as_service_error() {
        Some(service_err) => service_err.to_string(),
        None => DisplayErrorContext(err).to_string(),
    }
}

fn rejected<E, R>(err: SdkError<E, R>) -> ProviderError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    ProviderError::Rejected(describe(&err))
}

fn attribute(name: &str, value: &str) -> ProviderResult<AttributeType> {
    AttributeType::builder()
        .name(name)
        .value(value)
        .build()
        .map_err(|e| ProviderError::Internal(format!("Failed to build attribute {}: {}", name, e)))
}

#[async_trait]
impl IdentityProvider for CognitoIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str, nickname: &str) -> ProviderResult<()> {
        self.client
            .sign_up()
            .client_id(&self.config.client_id)
            .username(email)
            .password(password)
            .secret_hash(self.secret_hash(email)?)
            .user_attributes(attribute("email", email)?)
            .user_attributes(attribute("nickname", nickname)?)
            .send()
            .await
            .map_err(rejected)?;

        Ok(())
    }

    async fn confirm_sign_up(&self, email: &str, code: &str) -> ProviderResult<()> {
        self.client
            .confirm_sign_up()
            .client_id(&self.config.client_id)
            .username(email)
            .confirmation_code(code)
            .secret_hash(self.secret_hash(email)?)
            .send()
            .await
            .map_err(rejected)?;

        Ok(())
    }

    async fn resend_confirmation_code(&self, email: &str) -> ProviderResult<()> {
        self.client
            .resend_confirmation_code()
            .client_id(&self.config.client_id)
            .username(email)
            .secret_hash(self.secret_hash(email)?)
            .send()
            .await
            .map_err(rejected)?;

        Ok(())
    }

    async fn initiate_auth(
        &self,
        email: &str,
        password: &str,
    ) -> ProviderResult<Option<AuthTokens>> {
        let response = self
            .client
            .initiate_auth()
            .client_id(&self.config.client_id)
            .auth_flow(AuthFlowType::UserPasswordAuth)
            .auth_parameters("USERNAME", email)
            .auth_parameters("PASSWORD", password)
            .auth_parameters("SECRET_HASH", self.secret_hash(email)?)
            .send()
            .await
            .map_err(|err| {
                let unconfirmed = err
                    .as_service_error()
                    .is_some_and(|e| e.is_user_not_confirmed_exception());

                if unconfirmed {
                    ProviderError::UserNotConfirmed(describe(&err))
                } else {
                    rejected(err)
                }
            })?;

        Ok(response.authentication_result().map(|result| AuthTokens {
            id_token: result.id_token().unwrap_or_default().to_string(),
            access_token: result.access_token().unwrap_or_default().to_string(),
            refresh_token: result.refresh_token().unwrap_or_default().to_string(),
        }))
    }

    async fn admin_confirm_sign_up(&self, email: &str) -> ProviderResult<()> {
        self.client
            .admin_confirm_sign_up()
            .user_pool_id(&self.config.user_pool_id)
            .username(email)
            .send()
            .await
            .map_err(rejected)?;

        Ok(())
    }

    async fn change_password(
        &self,
        access_token: &str,
        old_password: &str,
        new_password: &str,
    ) -> ProviderResult<()> {
        self.client
            .change_password()
            .access_token(access_token)
            .previous_password(old_password)
            .proposed_password(new_password)
            .send()
            .await
            .map_err(rejected)?;

        Ok(())
    }
}
