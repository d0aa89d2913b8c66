//! Durable collections over the document store
//!
//! Orders and custom requests live as whole lists under a single document
//! each, cached in memory and rewritten on every change. There is no
//! per-record addressing; the last writer wins, exactly like the
//! single-key store this descends from.

use crate::domain::aggregates::order::{Order, OrderStatus};
use crate::error::{Result, StoreError};
use crate::storage::{JsonStore, DOC_CUSTOM_REQUESTS, DOC_ORDERS};
use crate::wizard::CustomRequest;
use tokio::sync::RwLock;

pub struct OrderBook {
    store: JsonStore,
    orders: RwLock<Vec<Order>>,
}

impl OrderBook {
    pub fn open(store: JsonStore) -> Result<Self> {
        let orders = store.load::<Vec<Order>>(DOC_ORDERS)?.unwrap_or_default();
        Ok(Self { store, orders: RwLock::new(orders) })
    }

    /// Newest first, optionally narrowed by status and a free-text search
    /// over order number, customer name and email.
    pub async fn list(&self, status: Option<OrderStatus>, search: Option<&str>) -> Vec<Order> {
        let orders = self.orders.read().await;
        let mut hits: Vec<Order> = orders
            .iter()
            .filter(|o| status.map_or(true, |s| o.order_status() == s))
            .filter(|o| {
                search.map_or(true, |q| {
                    let q = q.to_lowercase();
                    o.order_number().as_str().to_lowercase().contains(&q)
                        || o.customer_name().to_lowercase().contains(&q)
                        || o.customer_email().to_lowercase().contains(&q)
                })
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        hits
    }

    pub async fn find(&self, id: &str) -> Result<Order> {
        self.orders
            .read()
            .await
            .iter()
            .find(|o| o.id() == id)
            .cloned()
            .ok_or(StoreError::OrderNotFound)
    }

    pub async fn by_customer(&self, customer_id: &str) -> Vec<Order> {
        let orders = self.orders.read().await;
        let mut hits: Vec<Order> = orders
            .iter()
            .filter(|o| o.customer_id() == Some(customer_id))
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        hits
    }

    pub async fn append(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        orders.push(order);
        self.store.save(DOC_ORDERS, &*orders)?;
        Ok(())
    }

    /// Applies a transition to one order and rewrites the list. If the
    /// transition fails the list is left exactly as it was.
    pub async fn apply<F>(&self, id: &str, f: F) -> Result<Order>
    where
        F: FnOnce(&mut Order) -> Result<()>,
    {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|o| o.id() == id)
            .ok_or(StoreError::OrderNotFound)?;
        f(order)?;
        for event in order.take_events() {
            tracing::info!(?event, "order event");
        }
        let updated = order.clone();
        self.store.save(DOC_ORDERS, &*orders)?;
        Ok(updated)
    }
}

pub struct CustomRequestLog {
    store: JsonStore,
    requests: RwLock<Vec<CustomRequest>>,
}

impl CustomRequestLog {
    pub fn open(store: JsonStore) -> Result<Self> {
        let requests = store.load::<Vec<CustomRequest>>(DOC_CUSTOM_REQUESTS)?.unwrap_or_default();
        Ok(Self { store, requests: RwLock::new(requests) })
    }

    pub async fn list(&self) -> Vec<CustomRequest> {
        let mut hits = self.requests.read().await.clone();
        hits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        hits
    }

    pub async fn find(&self, id: &str) -> Result<CustomRequest> {
        self.requests
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::CustomRequestNotFound)
    }

    pub async fn append(&self, request: CustomRequest) -> Result<()> {
        let mut requests = self.requests.write().await;
        requests.push(request);
        self.store.save(DOC_CUSTOM_REQUESTS, &*requests)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::cart::{CartLine, CartTotals};
    use crate::domain::aggregates::order::OrderDetails;
    use crate::domain::value_objects::Money;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn temp_store() -> JsonStore {
        let dir = std::env::temp_dir().join(format!("fb-repo-{}", Uuid::new_v4()));
        JsonStore::open(dir).unwrap()
    }

    fn sample_order(name: &str) -> Order {
        let details = OrderDetails { customer_name: name.into(), ..OrderDetails::default() };
        let items = vec![CartLine { product_id: "1".into(), quantity: 1, customizations: None }];
        let totals = CartTotals {
            subtotal: Money::myr(Decimal::from(89)),
            delivery_fee: Money::myr(Decimal::from(15)),
            total: Money::myr(Decimal::from(104)),
        };
        Order::place(details, items, totals).unwrap()
    }

    #[tokio::test]
    async fn test_orders_survive_reopen() {
        let store = temp_store();
        let id = {
            let book = OrderBook::open(store.clone()).unwrap();
            let order = sample_order("Maya");
            let id = order.id().to_string();
            book.append(order).await.unwrap();
            id
        };
        let book = OrderBook::open(store).unwrap();
        assert_eq!(book.find(&id).await.unwrap().customer_name(), "Maya");
    }

    #[tokio::test]
    async fn test_apply_rejected_transition_changes_nothing() {
        let book = OrderBook::open(temp_store()).unwrap();
        let order = sample_order("Maya");
        let id = order.id().to_string();
        book.append(order).await.unwrap();

        // delivered before out_for_delivery is rejected
        let err = book.apply(&id, |o| Ok(o.mark_delivered()?)).await;
        assert!(err.is_err());
        assert_eq!(
            book.find(&id).await.unwrap().order_status(),
            OrderStatus::PaymentPending
        );
    }

    #[tokio::test]
    async fn test_list_filters_by_status_and_search() {
        let book = OrderBook::open(temp_store()).unwrap();
        book.append(sample_order("Maya")).await.unwrap();
        let confirmed = sample_order("Arif");
        let id = confirmed.id().to_string();
        book.append(confirmed).await.unwrap();
        book.apply(&id, |o| Ok(o.confirm_payment()?)).await.unwrap();

        let pending = book.list(Some(OrderStatus::PaymentPending), None).await;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].customer_name(), "Maya");

        let hits = book.list(None, Some("arif")).await;
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_by_customer_only_returns_their_orders() {
        let book = OrderBook::open(temp_store()).unwrap();
        let mine = Order::place(
            OrderDetails { customer_id: Some("1".into()), ..OrderDetails::default() },
            vec![CartLine { product_id: "1".into(), quantity: 1, customizations: None }],
            CartTotals {
                subtotal: Money::myr(Decimal::from(89)),
                delivery_fee: Money::myr(Decimal::from(15)),
                total: Money::myr(Decimal::from(104)),
            },
        )
        .unwrap();
        book.append(mine).await.unwrap();
        book.append(sample_order("Guest")).await.unwrap();

        assert_eq!(book.by_customer("1").await.len(), 1);
        assert!(book.by_customer("2").await.is_empty());
    }
}
