//! Checkout and order lifecycle handlers
//!
//! Checkout returns the order together with bank-transfer instructions:
//! there is no payment gateway, the customer transfers manually and sends
//! the receipt over WhatsApp, and an admin confirms it.

use crate::api::SessionQuery;
use crate::checkout::CheckoutForm;
use crate::domain::aggregates::order::{Order, OrderStatus};
use crate::domain::value_objects::Money;
use crate::error::Result;
use crate::notify;
use crate::state::SharedState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct PaymentInstructions {
    pub method: &'static str,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub amount: Money,
    pub reference: String,
    pub receipt_whatsapp_link: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order: Order,
    pub payment: PaymentInstructions,
}

pub async fn checkout(
    State(state): State<SharedState>,
    Path(session): Path<String>,
    Json(form): Json<CheckoutForm>,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    let order = state.checkout(&session, form).await?;
    let payment = PaymentInstructions {
        method: "bank_transfer",
        bank_name: state.config.bank_name.clone(),
        account_name: state.config.bank_account_name.clone(),
        account_number: state.config.bank_account_number.clone(),
        amount: order.total().clone(),
        reference: order.order_number().to_string(),
        receipt_whatsapp_link: notify::payment_receipt_link(
            &state.config.whatsapp_number,
            order.order_number(),
        ),
    };
    Ok((StatusCode::CREATED, Json(CheckoutResponse { order, payment })))
}

#[derive(Debug, Deserialize)]
pub struct OrderListParams {
    #[serde(default)]
    pub session: String,
    pub status: Option<OrderStatus>,
    pub q: Option<String>,
}

pub async fn list_orders(
    State(state): State<SharedState>,
    Query(params): Query<OrderListParams>,
) -> Result<Json<Vec<Order>>> {
    state.sessions.require_admin(&params.session).await?;
    Ok(Json(state.orders.list(params.status, params.q.as_deref()).await))
}

/// One line of an order as the storefront displays it; the product resolves
/// even when it has since been delisted.
#[derive(Debug, Serialize)]
pub struct OrderItemView {
    pub product_id: String,
    pub quantity: u32,
    pub title: Option<String>,
    pub unit_price: Option<Money>,
    pub is_delisted: bool,
}

#[derive(Debug, Serialize)]
pub struct OrderDetailResponse {
    pub order: Order,
    pub items: Vec<OrderItemView>,
}

async fn item_views(state: &SharedState, order: &Order) -> Vec<OrderItemView> {
    let mut views = Vec::with_capacity(order.items().len());
    for line in order.items() {
        let product = state.product_by_id(&line.product_id).await.ok();
        views.push(OrderItemView {
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            title: product.as_ref().map(|p| p.title().to_string()),
            unit_price: product.as_ref().map(|p| p.price().clone()),
            is_delisted: product.map_or(false, |p| p.is_delisted()),
        });
    }
    views
}

pub async fn get_order(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<OrderDetailResponse>> {
    let order = state.orders.find(&id).await?;
    let items = item_views(&state, &order).await;
    Ok(Json(OrderDetailResponse { order, items }))
}

pub async fn orders_by_customer(
    State(state): State<SharedState>,
    Path(customer_id): Path<String>,
) -> Json<Vec<Order>> {
    Json(state.orders.by_customer(&customer_id).await)
}

pub async fn confirm_payment(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Order>> {
    state.sessions.require_admin(&query.session).await?;
    Ok(Json(state.orders.apply(&id, |o| Ok(o.confirm_payment()?)).await?))
}

pub async fn start_delivery(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Order>> {
    state.sessions.require_admin(&query.session).await?;
    Ok(Json(state.orders.apply(&id, |o| Ok(o.start_delivery()?)).await?))
}

pub async fn mark_delivered(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Order>> {
    state.sessions.require_admin(&query.session).await?;
    Ok(Json(state.orders.apply(&id, |o| Ok(o.mark_delivered()?)).await?))
}

pub async fn cancel_order(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Order>> {
    state.sessions.require_admin(&query.session).await?;
    Ok(Json(state.orders.apply(&id, |o| Ok(o.cancel()?)).await?))
}
