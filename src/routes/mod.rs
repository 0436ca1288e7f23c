mod favourites;
mod health;
mod login;
mod password;
mod products;
mod register;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::{AppState, middleware::token_gate};

pub fn create_router() -> Router<AppState> {
    let gated = Router::new()
        .route("/favourites", get(favourites::get_favourites))
        .route(
            "/addfavourite",
            put(favourites::add_favourite).post(favourites::add_favourite),
        )
        .route(
            "/removefavourite",
            put(favourites::remove_favourite).post(favourites::remove_favourite),
        )
        .route_layer(middleware::from_fn(token_gate));

    Router::new()
        .route("/ping", get(health::ping))
        .route("/products", get(products::list_products))
        .route("/product", get(products::list_product_summaries))
        .route("/register", post(register::register_user))
        .route("/login", post(login::login_user))
        .route("/confirm", post(register::confirm_user))
        .route("/resend-confirm", post(register::resend_confirmation))
        .route("/change-password", post(password::change_password))
        .merge(gated)
}
