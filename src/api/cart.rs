//! Cart, favorites and UI flag handlers

use crate::domain::aggregates::cart::{Cart, CartLine, CartLinePatch, CartTotals, Customizations};
use crate::error::Result;
use crate::state::{SharedState, UiFlags};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
    pub ui: UiFlags,
}

async fn cart_view(state: &SharedState, session: &str) -> CartView {
    let (cart, totals): (Cart, CartTotals) = state.cart_view(session).await;
    CartView {
        items: cart.lines().to_vec(),
        totals,
        ui: state.ui_flags(session).await,
    }
}

pub async fn get_cart(
    State(state): State<SharedState>,
    Path(session): Path<String>,
) -> Json<CartView> {
    Json(cart_view(&state, &session).await)
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddToCartRequest {
    #[validate(length(min = 1))]
    pub product_id: String,
    #[validate(range(min = 1))]
    pub quantity: u32,
    #[serde(default)]
    pub customizations: Option<Customizations>,
}

pub async fn add_to_cart(
    State(state): State<SharedState>,
    Path(session): Path<String>,
    Json(req): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartView>)> {
    req.validate()?;
    let line = CartLine {
        product_id: req.product_id,
        quantity: req.quantity,
        customizations: req.customizations,
    };
    state.add_to_cart(&session, line).await?;
    Ok((StatusCode::CREATED, Json(cart_view(&state, &session).await)))
}

pub async fn update_item(
    State(state): State<SharedState>,
    Path((session, product_id)): Path<(String, String)>,
    Json(patch): Json<CartLinePatch>,
) -> Result<Json<CartView>> {
    state.update_cart_item(&session, &product_id, &patch).await?;
    Ok(Json(cart_view(&state, &session).await))
}

pub async fn remove_item(
    State(state): State<SharedState>,
    Path((session, product_id)): Path<(String, String)>,
) -> Json<CartView> {
    state.remove_from_cart(&session, &product_id).await;
    Json(cart_view(&state, &session).await)
}

pub async fn clear_cart(
    State(state): State<SharedState>,
    Path(session): Path<String>,
) -> Json<CartView> {
    state.clear_cart(&session).await;
    Json(cart_view(&state, &session).await)
}

pub async fn toggle_cart_panel(
    State(state): State<SharedState>,
    Path(session): Path<String>,
) -> Json<UiFlags> {
    Json(state.toggle_cart_panel(&session).await)
}

pub async fn toggle_menu(
    State(state): State<SharedState>,
    Path(session): Path<String>,
) -> Json<UiFlags> {
    Json(state.toggle_menu(&session).await)
}

pub async fn list_favorites(
    State(state): State<SharedState>,
    Path(session): Path<String>,
) -> Json<Vec<String>> {
    Json(state.favorites(&session).await)
}

pub async fn toggle_favorite(
    State(state): State<SharedState>,
    Path((session, product_id)): Path<(String, String)>,
) -> Json<Vec<String>> {
    Json(state.toggle_favorite(&session, &product_id).await)
}
