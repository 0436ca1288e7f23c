mod app_config;
mod sdk_config;

pub use app_config::{
    AWS_REGION, AppConfig, CatalogSource, CognitoConfig, CorsConfig, FavouritesBackend,
    ServerConfig,
};
pub use sdk_config::load_aws_config;
