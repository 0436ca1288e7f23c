use serde::{Deserialize, Serialize};

/// One user's saved deals, stored as a single row keyed by user id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavouritesRecord {
    pub user_id: String,
    pub product_ids: Vec<String>,
    pub version: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    pub deal_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouritesQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FavouriteStatus {
    Added,
    AlreadyInFavourites,
    Removed,
    NotInFavourites,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouritesResponse {
    pub favourite_products: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteMutationResponse {
    pub status: FavouriteStatus,
    pub favourite_products: Vec<String>,
}
