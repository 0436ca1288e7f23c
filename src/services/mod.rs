pub mod catalog_service;
pub mod cognito_service;
pub mod favourites_service;
pub mod identity_service;
