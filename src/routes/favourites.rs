use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::{
    AppState,
    error::Result,
    models::{FavouriteMutationResponse, FavouriteRequest, FavouritesQuery, FavouritesResponse},
    services::favourites_service::FavouriteOp,
    utils::{
        extractors::{JsonBody, require_field, resolve_user_id},
        jwt::Claims,
    },
};

pub async fn get_favourites(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<FavouritesQuery>,
) -> Result<Json<FavouritesResponse>> {
    let user_id = resolve_user_id(query.user_id, Some(&claims))?;

    let favourite_products = state.favourites.get(&user_id).await?;

    Ok(Json(FavouritesResponse { favourite_products }))
}

pub async fn add_favourite(
    state: State<AppState>,
    claims: Extension<Claims>,
    payload: JsonBody<FavouriteRequest>,
) -> Result<Json<FavouriteMutationResponse>> {
    mutate_favourites(state, claims, payload, FavouriteOp::Add).await
}

pub async fn remove_favourite(
    state: State<AppState>,
    claims: Extension<Claims>,
    payload: JsonBody<FavouriteRequest>,
) -> Result<Json<FavouriteMutationResponse>> {
    mutate_favourites(state, claims, payload, FavouriteOp::Remove).await
}

async fn mutate_favourites(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    JsonBody(payload): JsonBody<FavouriteRequest>,
    op: FavouriteOp,
) -> Result<Json<FavouriteMutationResponse>> {
    require_field(&payload.deal_id, "dealId")?;
    let user_id = resolve_user_id(payload.user_id, Some(&claims))?;

    let (status, favourite_products) = state
        .favourites
        .mutate(&user_id, &payload.deal_id, op)
        .await?;

    Ok(Json(FavouriteMutationResponse {
        status,
        favourite_products,
    }))
}
