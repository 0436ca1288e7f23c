use crate::error::{AppError, Result};
use std::env;

pub const AWS_REGION: &str = "eu-north-1";

const DEFAULT_FRONTEND_URLS: &str = "http://localhost:5173,http://localhost:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub cognito: CognitoConfig,
    pub catalog: CatalogSource,
    pub favourites: FavouritesBackend,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CognitoConfig {
    pub user_pool_id: String,
    pub client_id: String,
    pub client_secret: String,
}

/// Where the product catalog snapshot comes from at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Static,
    DynamoDb { table: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavouritesBackend {
    DynamoDb { table: String },
    Memory,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .map_err(|_| AppError::ConfigError("Invalid PORT value".to_string()))?,
                max_body_size: env::var("MAX_BODY_SIZE")
                    .unwrap_or_else(|_| "1048576".to_string())
                    .parse()
                    .map_err(|_| AppError::ConfigError("Invalid MAX_BODY_SIZE value".to_string()))?,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(
                    &env::var("FRONTEND_URL").unwrap_or_else(|_| DEFAULT_FRONTEND_URLS.to_string()),
                ),
            },
            cognito: CognitoConfig {
                user_pool_id: required("COGNITO_USER_POOL_ID")?,
                client_id: required("COGNITO_CLIENT_ID")?,
                client_secret: required("COGNITO_CLIENT_SECRET")?,
            },
            catalog: CatalogSource::parse(
                env::var("CATALOG_SOURCE").ok().as_deref(),
                env::var("PRODUCTS_TABLE").unwrap_or_else(|_| "Products".to_string()),
            )?,
            favourites: FavouritesBackend::parse(
                env::var("FAVOURITES_BACKEND").ok().as_deref(),
                env::var("FAVOURITES_TABLE").unwrap_or_else(|_| "UserFavourites".to_string()),
            )?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl CatalogSource {
    pub fn parse(mode: Option<&str>, table: String) -> Result<Self> {
        match mode.map(str::trim) {
            None | Some("") | Some("static") => Ok(Self::Static),
            Some("dynamodb") => Ok(Self::DynamoDb { table }),
            Some(other) => Err(AppError::ConfigError(format!(
                "Invalid CATALOG_SOURCE value: {}",
                other
            ))),
        }
    }
}

impl FavouritesBackend {
    pub fn parse(mode: Option<&str>, table: String) -> Result<Self> {
        match mode.map(str::trim) {
            None | Some("") | Some("dynamodb") => Ok(Self::DynamoDb { table }),
            Some("memory") => Ok(Self::Memory),
            Some(other) => Err(AppError::ConfigError(format!(
                "Invalid FAVOURITES_BACKEND value: {}",
                other
            ))),
        }
    }
}

fn required(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::ConfigError(format!("{} not set", key))),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
