//! Shared application state
//!
//! The single source of truth for session-scoped commerce state: the live
//! product list, per-session carts, favorites and UI flags, the content
//! collections, and handles to the durable repositories. All mutation goes
//! through methods here; handlers never touch the collections directly.

use crate::catalog;
use crate::checkout::{CheckoutFlow, CheckoutForm};
use crate::config::Config;
use crate::content::{CustomerReview, VideoContent};
use crate::domain::aggregates::cart::{Cart, CartLine, CartLinePatch, CartTotals};
use crate::domain::aggregates::order::Order;
use crate::domain::aggregates::product::{Product, ProductDraft};
use crate::domain::value_objects::Money;
use crate::error::{Result, StoreError};
use crate::repo::{CustomRequestLog, OrderBook};
use crate::session::SessionService;
use crate::storage::JsonStore;
use crate::wizard::{ArrangementWizard, CustomRequest, WizardSelections};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct UiFlags {
    pub cart_open: bool,
    pub menu_open: bool,
}

pub struct AppState {
    pub config: Config,
    pub sessions: SessionService,
    pub orders: OrderBook,
    pub custom_requests: CustomRequestLog,
    products: RwLock<Vec<Product>>,
    carts: RwLock<HashMap<String, Cart>>,
    favorites: RwLock<HashMap<String, Vec<String>>>,
    ui: RwLock<HashMap<String, UiFlags>>,
    reviews: RwLock<Vec<CustomerReview>>,
    videos: RwLock<Vec<VideoContent>>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn open(config: Config) -> Result<Self> {
        let store = JsonStore::open(&config.data_dir)?;
        Ok(Self {
            sessions: SessionService::open(store.clone(), &config)?,
            orders: OrderBook::open(store.clone())?,
            custom_requests: CustomRequestLog::open(store)?,
            config,
            products: RwLock::new(catalog::seed_products()),
            carts: RwLock::new(HashMap::new()),
            favorites: RwLock::new(HashMap::new()),
            ui: RwLock::new(HashMap::new()),
            reviews: RwLock::new(Vec::new()),
            videos: RwLock::new(Vec::new()),
        })
    }

    // --- products -----------------------------------------------------

    pub async fn active_products(
        &self,
        category: &str,
        search: Option<&str>,
        express_only: bool,
    ) -> Vec<Product> {
        let products = self.products.read().await;
        catalog::filter_active(&products, category, search, express_only)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn product_by_slug(&self, slug: &str) -> Result<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.slug() == slug && !p.is_delisted())
            .cloned()
            .ok_or(StoreError::ProductNotFound)
    }

    /// Id lookup also resolves delisted products so order history can keep
    /// rendering them.
    pub async fn product_by_id(&self, id: &str) -> Result<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id() == id)
            .cloned()
            .ok_or(StoreError::ProductNotFound)
    }

    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product> {
        let mut product = Product::create(draft)?;
        self.drain_product_events(&mut product);
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    pub async fn replace_product(&self, id: &str, draft: ProductDraft) -> Result<Product> {
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(StoreError::ProductNotFound)?;
        product.replace(draft)?;
        let mut updated = product.clone();
        self.drain_product_events(&mut updated);
        Ok(updated)
    }

    pub async fn delist_product(&self, id: &str) -> Result<Product> {
        self.with_product(id, |p| p.delist()).await
    }

    pub async fn relist_product(&self, id: &str) -> Result<Product> {
        self.with_product(id, |p| p.relist()).await
    }

    async fn with_product(&self, id: &str, f: impl FnOnce(&mut Product)) -> Result<Product> {
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(StoreError::ProductNotFound)?;
        f(product);
        let mut updated = product.clone();
        self.drain_product_events(&mut updated);
        Ok(updated)
    }

    fn drain_product_events(&self, product: &mut Product) {
        for event in product.take_events() {
            tracing::info!(?event, "product event");
        }
    }

    async fn price_of(&self, product_id: &str) -> Option<Money> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id() == product_id)
            .map(|p| p.price().clone())
    }

    // --- cart ---------------------------------------------------------

    /// Adds a line and opens the cart panel, the storefront's side effect.
    pub async fn add_to_cart(&self, session: &str, line: CartLine) -> Result<()> {
        // Delisted products are non-purchasable.
        let product = self.product_by_id(&line.product_id).await?;
        if product.is_delisted() {
            return Err(StoreError::ProductNotFound);
        }
        self.carts
            .write()
            .await
            .entry(session.to_string())
            .or_default()
            .add_line(line)?;
        self.ui.write().await.entry(session.to_string()).or_default().cart_open = true;
        Ok(())
    }

    pub async fn remove_from_cart(&self, session: &str, product_id: &str) {
        if let Some(cart) = self.carts.write().await.get_mut(session) {
            cart.remove_product(product_id);
        }
    }

    pub async fn update_cart_item(
        &self,
        session: &str,
        product_id: &str,
        patch: &CartLinePatch,
    ) -> Result<()> {
        let mut carts = self.carts.write().await;
        let cart = carts.get_mut(session).ok_or(StoreError::Cart(
            crate::domain::aggregates::cart::CartError::ProductNotInCart,
        ))?;
        cart.update_product(product_id, patch)?;
        Ok(())
    }

    pub async fn cart_view(&self, session: &str) -> (Cart, CartTotals) {
        let cart = self.carts.read().await.get(session).cloned().unwrap_or_default();
        let totals = self.cart_totals(&cart).await;
        (cart, totals)
    }

    pub async fn clear_cart(&self, session: &str) {
        if let Some(cart) = self.carts.write().await.get_mut(session) {
            cart.clear();
        }
    }

    async fn cart_totals(&self, cart: &Cart) -> CartTotals {
        let products = self.products.read().await;
        cart.totals(|id| {
            products.iter().find(|p| p.id() == id).map(|p| p.price().clone())
        })
    }

    // --- favorites and UI flags ---------------------------------------

    /// Involution: toggling twice restores the original set.
    pub async fn toggle_favorite(&self, session: &str, product_id: &str) -> Vec<String> {
        let mut favorites = self.favorites.write().await;
        let list = favorites.entry(session.to_string()).or_default();
        if let Some(pos) = list.iter().position(|id| id == product_id) {
            list.remove(pos);
        } else {
            list.push(product_id.to_string());
        }
        list.clone()
    }

    pub async fn favorites(&self, session: &str) -> Vec<String> {
        self.favorites.read().await.get(session).cloned().unwrap_or_default()
    }

    pub async fn toggle_cart_panel(&self, session: &str) -> UiFlags {
        let mut ui = self.ui.write().await;
        let flags = ui.entry(session.to_string()).or_default();
        flags.cart_open = !flags.cart_open;
        *flags
    }

    pub async fn toggle_menu(&self, session: &str) -> UiFlags {
        let mut ui = self.ui.write().await;
        let flags = ui.entry(session.to_string()).or_default();
        flags.menu_open = !flags.menu_open;
        *flags
    }

    pub async fn ui_flags(&self, session: &str) -> UiFlags {
        self.ui.read().await.get(session).copied().unwrap_or_default()
    }

    // --- checkout -----------------------------------------------------

    /// Runs the full checkout flow against the session's cart. The order is
    /// persisted before the cart is cleared; a storage failure leaves the
    /// cart intact.
    pub async fn checkout(&self, session: &str, form: CheckoutForm) -> Result<Order> {
        let (cart, totals) = self.cart_view(session).await;
        if cart.is_empty() {
            return Err(StoreError::Order(
                crate::domain::aggregates::order::OrderError::EmptyOrder,
            ));
        }
        let mut flow = CheckoutFlow::new(form);
        flow.advance()?;
        flow.advance()?;
        let user = self.sessions.current_user(session).await;
        let mut order = flow.complete(user.as_ref(), cart.lines().to_vec(), totals)?;
        for event in order.take_events() {
            tracing::info!(?event, "order event");
        }
        self.orders.append(order.clone()).await?;
        self.clear_cart(session).await;
        self.ui.write().await.entry(session.to_string()).or_default().cart_open = false;
        Ok(order)
    }

    // --- custom requests ----------------------------------------------

    pub async fn submit_custom_request(
        &self,
        session: &str,
        selections: WizardSelections,
    ) -> Result<CustomRequest> {
        let user = self.sessions.current_user(session).await;
        let wizard = ArrangementWizard::with_selections(selections);
        let request = wizard.submit(user.map(|u| u.id))?;
        tracing::info!(event = ?request.submitted_event(), "custom request event");
        self.custom_requests.append(request.clone()).await?;
        Ok(request)
    }

    // --- content ------------------------------------------------------

    pub async fn reviews(&self, approved_only: bool) -> Vec<CustomerReview> {
        self.reviews
            .read()
            .await
            .iter()
            .filter(|r| !approved_only || r.is_approved)
            .cloned()
            .collect()
    }

    pub async fn add_review(&self, review: CustomerReview) -> CustomerReview {
        self.reviews.write().await.push(review.clone());
        review
    }

    pub async fn approve_review(&self, id: &str) -> Result<CustomerReview> {
        let mut reviews = self.reviews.write().await;
        let review = reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::ProductNotFound)?;
        review.is_approved = true;
        Ok(review.clone())
    }

    pub async fn videos(&self, active_only: bool) -> Vec<VideoContent> {
        self.videos
            .read()
            .await
            .iter()
            .filter(|v| !active_only || v.is_active)
            .cloned()
            .collect()
    }

    pub async fn add_video(&self, video: VideoContent) -> VideoContent {
        self.videos.write().await.push(video.clone());
        video
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::CheckoutForm;
    use crate::domain::aggregates::order::DeliveryAddress;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn state() -> AppState {
        let dir = std::env::temp_dir().join(format!("fb-state-{}", Uuid::new_v4()));
        AppState::open(Config::for_tests(dir)).unwrap()
    }

    fn line(product_id: &str, quantity: u32) -> CartLine {
        CartLine { product_id: product_id.into(), quantity, customizations: None }
    }

    fn checkout_form() -> CheckoutForm {
        CheckoutForm {
            customer_name: "Maya Tan".into(),
            customer_email: "maya@example.com".into(),
            customer_phone: "+60 12-345 6789".into(),
            delivery_address: DeliveryAddress {
                name: "Aunty Lim".into(),
                phone: "+60 12-987 6543".into(),
                address: "12 Jalan Bukit".into(),
                city: "Kuala Lumpur".into(),
                postcode: "50000".into(),
                state: "Kuala Lumpur".into(),
                special_instructions: None,
            },
            delivery_date: "2026-09-01".into(),
            delivery_time: "09:00-12:00".into(),
            notes: None,
            as_guest: true,
        }
    }

    #[tokio::test]
    async fn test_add_to_cart_opens_panel() {
        let state = state();
        state.add_to_cart("s1", line("1", 1)).await.unwrap();
        assert!(state.ui_flags("s1").await.cart_open);
        let (cart, _) = state.cart_view("s1").await;
        assert_eq!(cart.line_count(), 1);
    }

    #[tokio::test]
    async fn test_cannot_add_delisted_product() {
        let state = state();
        state.delist_product("1").await.unwrap();
        let err = state.add_to_cart("s1", line("1", 1)).await.unwrap_err();
        assert!(matches!(err, StoreError::ProductNotFound));
    }

    #[tokio::test]
    async fn test_favorites_double_toggle_restores_set() {
        let state = state();
        state.toggle_favorite("s1", "2").await;
        let before = state.favorites("s1").await;
        state.toggle_favorite("s1", "4").await;
        state.toggle_favorite("s1", "4").await;
        assert_eq!(state.favorites("s1").await, before);
    }

    #[tokio::test]
    async fn test_cart_totals_use_catalog_prices() {
        let state = state();
        // product 1 is RM89, product 4 is RM79: subtotal 168 clears the
        // free-delivery threshold.
        state.add_to_cart("s1", line("1", 1)).await.unwrap();
        state.add_to_cart("s1", line("4", 1)).await.unwrap();
        let (_, totals) = state.cart_view("s1").await;
        assert_eq!(totals.subtotal.amount(), Decimal::from(168));
        assert!(totals.delivery_fee.is_zero());
        assert_eq!(totals.total.amount(), Decimal::from(168));
    }

    #[tokio::test]
    async fn test_checkout_clears_cart_and_snapshots_items() {
        let state = state();
        state.add_to_cart("s1", line("1", 2)).await.unwrap();
        let (cart_before, _) = state.cart_view("s1").await;

        let order = state.checkout("s1", checkout_form()).await.unwrap();
        assert_eq!(order.items(), cart_before.lines());

        let (cart_after, _) = state.cart_view("s1").await;
        assert!(cart_after.is_empty());

        // Mutating the cart afterwards does not reach the stored order.
        state.add_to_cart("s1", line("5", 3)).await.unwrap();
        let stored = state.orders.find(order.id()).await.unwrap();
        assert_eq!(stored.items(), cart_before.lines());

        // Exactly one order was created.
        assert_eq!(state.orders.list(None, None).await.len(), 1);
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_is_rejected() {
        let state = state();
        assert!(state.checkout("s1", checkout_form()).await.is_err());
    }

    #[tokio::test]
    async fn test_delisted_product_still_renders_in_order_history() {
        let state = state();
        state.add_to_cart("s1", line("1", 1)).await.unwrap();
        let order = state.checkout("s1", checkout_form()).await.unwrap();

        state.delist_product("1").await.unwrap();
        let all = state.active_products(catalog::CATEGORY_ALL, None, false).await;
        assert!(all.iter().all(|p| p.id() != "1"));

        // The order's item still resolves through id lookup.
        let found = state.orders.find(order.id()).await.unwrap();
        let item = &found.items()[0];
        let product = state.product_by_id(&item.product_id).await.unwrap();
        assert!(product.is_delisted());
        assert_eq!(product.title(), "Sunset Garden Basket");
    }

    #[tokio::test]
    async fn test_update_cart_item_patches_quantity() {
        let state = state();
        state.add_to_cart("s1", line("1", 1)).await.unwrap();
        state
            .update_cart_item("s1", "1", &CartLinePatch { quantity: Some(3), customizations: None })
            .await
            .unwrap();
        let (cart, _) = state.cart_view("s1").await;
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_replace_product_is_wholesale() {
        let state = state();
        let original = state.product_by_id("1").await.unwrap();
        let draft = ProductDraft {
            title: "Renamed Basket".into(),
            slug: "renamed-basket".into(),
            description: "New copy".into(),
            images: vec![],
            price: Money::myr(Decimal::from(99)),
            price_range: None,
            tags: vec![],
            category: "Premium".into(),
            is_express: false,
        };
        let updated = state.replace_product("1", draft).await.unwrap();
        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.title(), "Renamed Basket");
        assert!(updated.price_range().is_none());
    }
}
