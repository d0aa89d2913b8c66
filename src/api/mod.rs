//! HTTP API
//!
//! Thin axum handlers over [`crate::state::AppState`]. Handlers validate
//! the request, call one state method, and let [`crate::error::StoreError`]
//! map failures to responses. Session identity is an opaque client-chosen
//! id carried in the path (cart routes) or the `session` query parameter.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod wizard;

use crate::state::SharedState;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;

/// Query parameter carrying the caller's session id, used by endpoints
/// that are not already addressed per-session in the path.
#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    #[serde(default)]
    pub session: String,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        // catalog
        .route("/api/v1/products", get(catalog::list_products).post(catalog::create_product))
        .route("/api/v1/products/:id", get(catalog::get_product).put(catalog::update_product))
        .route("/api/v1/products/:id/inquiry", get(catalog::product_inquiry))
        .route("/api/v1/products/:id/delist", post(catalog::delist_product))
        .route("/api/v1/products/:id/relist", post(catalog::relist_product))
        .route("/api/v1/content/moods", get(catalog::list_color_moods))
        .route("/api/v1/content/flowers", get(catalog::list_flowers))
        .route("/api/v1/content/fruits", get(catalog::list_fruits))
        .route("/api/v1/content/occasions", get(catalog::list_occasions))
        .route("/api/v1/content/reviews", get(catalog::list_reviews).post(catalog::create_review))
        .route("/api/v1/content/reviews/:id/approve", post(catalog::approve_review))
        .route("/api/v1/content/videos", get(catalog::list_videos).post(catalog::create_video))
        // cart, favorites, UI flags
        .route(
            "/api/v1/cart/:session",
            get(cart::get_cart).post(cart::add_to_cart).delete(cart::clear_cart),
        )
        .route(
            "/api/v1/cart/:session/items/:product_id",
            put(cart::update_item).delete(cart::remove_item),
        )
        .route("/api/v1/cart/:session/toggle", post(cart::toggle_cart_panel))
        .route("/api/v1/cart/:session/menu", post(cart::toggle_menu))
        .route(
            "/api/v1/cart/:session/favorites",
            get(cart::list_favorites),
        )
        .route(
            "/api/v1/cart/:session/favorites/:product_id",
            post(cart::toggle_favorite),
        )
        // checkout and orders
        .route("/api/v1/checkout/:session", post(orders::checkout))
        .route("/api/v1/orders", get(orders::list_orders))
        .route("/api/v1/orders/:id", get(orders::get_order))
        .route("/api/v1/orders/by-customer/:customer_id", get(orders::orders_by_customer))
        .route("/api/v1/orders/:id/confirm-payment", post(orders::confirm_payment))
        .route("/api/v1/orders/:id/start-delivery", post(orders::start_delivery))
        .route("/api/v1/orders/:id/deliver", post(orders::mark_delivered))
        .route("/api/v1/orders/:id/cancel", post(orders::cancel_order))
        // custom arrangement requests
        .route(
            "/api/v1/custom-requests",
            get(wizard::list_requests).post(wizard::submit_request),
        )
        .route("/api/v1/custom-requests/estimate", post(wizard::estimate))
        // auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/google", post(auth::login_with_google))
        .route("/api/v1/auth/admin", post(auth::admin_login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/session", get(auth::current_session))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy", "service": "fruitbasket-storefront" }))
}
