use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
};
use aws_sdk_cognitoidentityprovider::Client as CognitoClient;
use aws_sdk_dynamodb::Client as DynamoClient;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::{AppConfig, CorsConfig, FavouritesBackend, ServerConfig, load_aws_config},
    error::{AppError, Result},
    queries::{favourites_queries::DynamoFavouritesStore, memory_favourites::MemoryFavouritesStore},
    routes,
    services::{
        catalog_service::Catalog,
        cognito_service::CognitoIdentityProvider,
        favourites_service::{FavouritesRepository, FavouritesService},
        identity_service::IdentityGateway,
    },
};

const CORS_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub identity: Arc<IdentityGateway>,
    pub favourites: Arc<FavouritesService>,
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let sdk_config = load_aws_config().await;

    let catalog = Catalog::load(&config.catalog, &sdk_config).await?;

    let provider = CognitoIdentityProvider::new(
        CognitoClient::new(&sdk_config),
        config.cognito.clone(),
    );

    let repository: Arc<dyn FavouritesRepository> = match &config.favourites {
        FavouritesBackend::DynamoDb { table } => Arc::new(DynamoFavouritesStore::new(
            DynamoClient::new(&sdk_config),
            table.clone(),
        )),
        FavouritesBackend::Memory => {
            tracing::warn!("Favourites are kept in memory and lost on restart");
            Arc::new(MemoryFavouritesStore::default())
        }
    };

    tracing::warn!(
        "Token gate accepts bearer tokens without verifying their signature, \
         and favourites honour any caller-supplied userId"
    );

    let state = AppState {
        catalog: Arc::new(catalog),
        identity: Arc::new(IdentityGateway::new(Arc::new(provider))),
        favourites: Arc::new(FavouritesService::new(repository)),
    };

    router(state, &config.server, &config.cors)
}

pub fn router(state: AppState, server: &ServerConfig, cors: &CorsConfig) -> Result<Router> {
    let allowed_origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .map(|origin| {
            // Credentialed CORS cannot use a wildcard origin.
            if origin.contains('*') {
                return Err(AppError::ConfigError(format!(
                    "Wildcard CORS origin not allowed: {}",
                    origin
                )));
            }
            origin
                .parse::<HeaderValue>()
                .map_err(|_| AppError::ConfigError(format!("Invalid CORS origin: {}", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
        .allow_origin(allowed_origins)
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE);

    let app = routes::create_router()
        .layer(DefaultBodyLimit::max(server.max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}
