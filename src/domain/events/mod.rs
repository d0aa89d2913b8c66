//! Domain events
//!
//! Aggregates raise events on meaningful transitions; services drain them
//! with `take_events` and emit them through `tracing`.

use crate::domain::value_objects::OrderNumber;
use rust_decimal::Decimal;

#[derive(Clone, Debug)]
pub enum DomainEvent {
    Product(ProductEvent),
    Order(OrderEvent),
    CustomRequest(CustomRequestEvent),
}

#[derive(Clone, Debug)]
pub enum ProductEvent {
    Created { product_id: String, slug: String },
    Replaced { product_id: String },
    Delisted { product_id: String },
    Relisted { product_id: String },
}

#[derive(Clone, Debug)]
pub enum OrderEvent {
    Placed { order_id: String, order_number: OrderNumber, total: Decimal },
    PaymentConfirmed { order_id: String },
    OutForDelivery { order_id: String },
    Delivered { order_id: String },
    Cancelled { order_id: String },
}

#[derive(Clone, Debug)]
pub enum CustomRequestEvent {
    Submitted { request_id: String, estimated_cost: Decimal },
}
