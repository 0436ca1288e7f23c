use axum::{Json, extract::State};

use crate::{
    AppState,
    models::{Product, ProductSummary},
};

pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog.products().to_vec())
}

pub async fn list_product_summaries(State(state): State<AppState>) -> Json<Vec<ProductSummary>> {
    Json(state.catalog.summaries().to_vec())
}
