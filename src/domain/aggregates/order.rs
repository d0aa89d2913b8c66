//! Order Aggregate
//!
//! An order freezes the cart at checkout: items and totals are copied, not
//! referenced. After creation only the status fields move, and only along
//! payment_pending -> order_confirmed -> out_for_delivery -> delivered,
//! with cancellation reachable from any non-terminal state.

use crate::domain::aggregates::cart::{CartLine, CartTotals};
use crate::domain::events::{DomainEvent, OrderEvent};
use crate::domain::value_objects::{Money, OrderNumber};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    id: String,
    order_number: OrderNumber,
    customer_id: Option<String>,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    is_guest: bool,
    items: Vec<CartLine>,
    subtotal: Money,
    delivery_fee: Money,
    total: Money,
    delivery_address: DeliveryAddress,
    delivery_date: String,
    delivery_time: String,
    payment_method: PaymentMethod,
    payment_status: PaymentStatus,
    order_status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    notes: Option<String>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

/// The only supported method is a manual bank transfer, confirmed by an
/// admin once the customer sends the receipt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    BankTransfer,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Confirmed,
    Failed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    PaymentPending,
    OrderConfirmed,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// Customer-facing details gathered by the checkout flow.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OrderDetails {
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub is_guest: bool,
    pub delivery_address: DeliveryAddress,
    pub delivery_date: String,
    pub delivery_time: String,
    pub notes: Option<String>,
}

impl Order {
    /// Places an order from a cart snapshot. Items are clones of the cart
    /// lines at this instant: later cart mutations cannot reach them.
    pub fn place(
        details: OrderDetails,
        items: Vec<CartLine>,
        totals: CartTotals,
    ) -> Result<Self, OrderError> {
        if items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        let order_number = OrderNumber::generate_at(now);
        let mut order = Self {
            id: id.clone(),
            order_number: order_number.clone(),
            customer_id: details.customer_id,
            customer_name: details.customer_name,
            customer_email: details.customer_email,
            customer_phone: details.customer_phone,
            is_guest: details.is_guest,
            items,
            subtotal: totals.subtotal,
            delivery_fee: totals.delivery_fee,
            total: totals.total,
            delivery_address: details.delivery_address,
            delivery_date: details.delivery_date,
            delivery_time: details.delivery_time,
            payment_method: PaymentMethod::BankTransfer,
            payment_status: PaymentStatus::Pending,
            order_status: OrderStatus::PaymentPending,
            created_at: now,
            updated_at: now,
            notes: details.notes,
            events: vec![],
        };
        let total = order.total.amount();
        order.raise_event(DomainEvent::Order(OrderEvent::Placed {
            order_id: id,
            order_number,
            total,
        }));
        Ok(order)
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn order_number(&self) -> &OrderNumber { &self.order_number }
    pub fn customer_id(&self) -> Option<&str> { self.customer_id.as_deref() }
    pub fn customer_name(&self) -> &str { &self.customer_name }
    pub fn customer_email(&self) -> &str { &self.customer_email }
    pub fn is_guest(&self) -> bool { self.is_guest }
    pub fn items(&self) -> &[CartLine] { &self.items }
    pub fn subtotal(&self) -> &Money { &self.subtotal }
    pub fn delivery_fee(&self) -> &Money { &self.delivery_fee }
    pub fn total(&self) -> &Money { &self.total }
    pub fn delivery_address(&self) -> &DeliveryAddress { &self.delivery_address }
    pub fn payment_status(&self) -> PaymentStatus { self.payment_status }
    pub fn order_status(&self) -> OrderStatus { self.order_status }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    /// Admin confirms the bank transfer arrived.
    pub fn confirm_payment(&mut self) -> Result<(), OrderError> {
        self.expect_status(OrderStatus::PaymentPending, "confirm payment")?;
        self.payment_status = PaymentStatus::Confirmed;
        self.order_status = OrderStatus::OrderConfirmed;
        self.touch();
        self.raise_event(DomainEvent::Order(OrderEvent::PaymentConfirmed {
            order_id: self.id.clone(),
        }));
        Ok(())
    }

    pub fn start_delivery(&mut self) -> Result<(), OrderError> {
        self.expect_status(OrderStatus::OrderConfirmed, "start delivery")?;
        self.order_status = OrderStatus::OutForDelivery;
        self.touch();
        self.raise_event(DomainEvent::Order(OrderEvent::OutForDelivery {
            order_id: self.id.clone(),
        }));
        Ok(())
    }

    pub fn mark_delivered(&mut self) -> Result<(), OrderError> {
        self.expect_status(OrderStatus::OutForDelivery, "mark delivered")?;
        self.order_status = OrderStatus::Delivered;
        self.touch();
        self.raise_event(DomainEvent::Order(OrderEvent::Delivered {
            order_id: self.id.clone(),
        }));
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), OrderError> {
        if self.order_status.is_terminal() {
            return Err(OrderError::InvalidTransition {
                action: "cancel",
                status: self.order_status,
            });
        }
        self.order_status = OrderStatus::Cancelled;
        if self.payment_status == PaymentStatus::Pending {
            self.payment_status = PaymentStatus::Failed;
        }
        self.touch();
        self.raise_event(DomainEvent::Order(OrderEvent::Cancelled {
            order_id: self.id.clone(),
        }));
        Ok(())
    }

    fn expect_status(&self, expected: OrderStatus, action: &'static str) -> Result<(), OrderError> {
        if self.order_status != expected {
            return Err(OrderError::InvalidTransition { action, status: self.order_status });
        }
        Ok(())
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
    fn touch(&mut self) { self.updated_at = Utc::now(); }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("an order needs at least one item")]
    EmptyOrder,
    #[error("cannot {action} while the order is {status:?}")]
    InvalidTransition { action: &'static str, status: OrderStatus },
}
