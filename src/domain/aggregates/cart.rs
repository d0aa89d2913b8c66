//! Cart Aggregate
//!
//! Lines are never merged: adding the same product twice keeps two lines,
//! because each line can carry its own customizations. Removal and updates
//! address every line for a product at once, matching the storefront's
//! behavior.

use crate::domain::value_objects::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Orders over this subtotal ship free; everything else pays a flat fee.
pub const FREE_DELIVERY_THRESHOLD: u32 = 150;
pub const DELIVERY_FEE: u32 = 15;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customizations: Option<Customizations>,
}

/// Selections from the custom arrangement path, carried per line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Customizations {
    pub color_moods: Vec<String>,
    pub flowers: Vec<String>,
    pub fruits: Vec<FruitPick>,
    pub budget: Decimal,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FruitPick {
    pub id: String,
    pub quantity: u32,
}

/// Patch applied by `update_product`; absent fields are left alone.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CartLinePatch {
    pub quantity: Option<u32>,
    pub customizations: Option<Customizations>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CartTotals {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

impl Cart {
    pub fn new() -> Self { Self::default() }

    pub fn lines(&self) -> &[CartLine] { &self.lines }
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }
    pub fn line_count(&self) -> usize { self.lines.len() }

    /// Appends unconditionally; duplicate product ids stay separate lines.
    pub fn add_line(&mut self, line: CartLine) -> Result<(), CartError> {
        if line.quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        self.lines.push(line);
        Ok(())
    }

    /// Removes every line for the product. Unknown ids are a no-op.
    pub fn remove_product(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Shallow-merges the patch into every line for the product. A quantity
    /// of zero removes the line(s).
    pub fn update_product(&mut self, product_id: &str, patch: &CartLinePatch) -> Result<(), CartError> {
        if !self.lines.iter().any(|l| l.product_id == product_id) {
            return Err(CartError::ProductNotInCart);
        }
        for line in self.lines.iter_mut().filter(|l| l.product_id == product_id) {
            if let Some(qty) = patch.quantity {
                line.quantity = qty;
            }
            if let Some(custom) = &patch.customizations {
                line.customizations = Some(custom.clone());
            }
        }
        self.lines.retain(|l| l.quantity > 0);
        Ok(())
    }

    pub fn clear(&mut self) { self.lines.clear(); }

    /// Totals priced against the live catalog. Lines whose product no longer
    /// resolves contribute nothing, matching the storefront's lookup-or-zero
    /// pricing.
    pub fn totals<F>(&self, price_of: F) -> CartTotals
    where
        F: Fn(&str) -> Option<Money>,
    {
        let subtotal = self.lines.iter().fold(Money::myr(Decimal::ZERO), |acc, line| {
            match price_of(&line.product_id) {
                Some(price) => acc.add(&price.multiply(line.quantity)).unwrap_or(acc),
                None => acc,
            }
        });
        let delivery_fee = if subtotal.amount() > Decimal::from(FREE_DELIVERY_THRESHOLD) {
            Money::myr(Decimal::ZERO)
        } else {
            Money::myr(Decimal::from(DELIVERY_FEE))
        };
        let total = subtotal.add(&delivery_fee).unwrap_or_else(|_| subtotal.clone());
        CartTotals { subtotal, delivery_fee, total }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("quantity must be positive")]
    ZeroQuantity,
    #[error("product is not in the cart")]
    ProductNotInCart,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: &str, quantity: u32) -> CartLine {
        CartLine { product_id: product_id.into(), quantity, customizations: None }
    }

    fn flat_price(amount: u32) -> impl Fn(&str) -> Option<Money> {
        move |_| Some(Money::myr(Decimal::from(amount)))
    }

    #[test]
    fn test_duplicate_product_keeps_separate_lines() {
        let mut cart = Cart::new();
        cart.add_line(line("1", 1)).unwrap();
        cart.add_line(line("1", 2)).unwrap();
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_add_then_remove_leaves_no_lines_for_product() {
        let mut cart = Cart::new();
        cart.add_line(line("1", 1)).unwrap();
        cart.add_line(line("2", 1)).unwrap();
        cart.add_line(line("1", 3)).unwrap();
        cart.remove_product("1");
        assert!(cart.lines().iter().all(|l| l.product_id != "1"));
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_line(line("1", 0)), Err(CartError::ZeroQuantity));
    }

    #[test]
    fn test_update_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_line(line("1", 2)).unwrap();
        cart.update_product("1", &CartLinePatch { quantity: Some(0), customizations: None }).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_unknown_product_is_error() {
        let mut cart = Cart::new();
        let err = cart.update_product("nope", &CartLinePatch::default()).unwrap_err();
        assert_eq!(err, CartError::ProductNotInCart);
    }

    #[test]
    fn test_delivery_fee_below_threshold() {
        // 140 subtotal pays the flat fee: 155 in total.
        let mut cart = Cart::new();
        cart.add_line(line("1", 2)).unwrap();
        let totals = cart.totals(flat_price(70));
        assert_eq!(totals.subtotal.amount(), Decimal::from(140));
        assert_eq!(totals.delivery_fee.amount(), Decimal::from(15));
        assert_eq!(totals.total.amount(), Decimal::from(155));
    }

    #[test]
    fn test_delivery_free_above_threshold() {
        let mut cart = Cart::new();
        cart.add_line(line("1", 2)).unwrap();
        let totals = cart.totals(flat_price(80));
        assert_eq!(totals.subtotal.amount(), Decimal::from(160));
        assert!(totals.delivery_fee.is_zero());
        assert_eq!(totals.total.amount(), Decimal::from(160));
    }

    #[test]
    fn test_delivery_fee_at_exact_threshold() {
        // Free delivery requires strictly more than 150.
        let mut cart = Cart::new();
        cart.add_line(line("1", 1)).unwrap();
        let totals = cart.totals(flat_price(150));
        assert_eq!(totals.delivery_fee.amount(), Decimal::from(15));
        assert_eq!(totals.total.amount(), Decimal::from(165));
    }

    #[test]
    fn test_total_is_subtotal_plus_fee() {
        let mut cart = Cart::new();
        cart.add_line(line("1", 1)).unwrap();
        cart.add_line(line("2", 3)).unwrap();
        let totals = cart.totals(flat_price(20));
        assert_eq!(
            totals.total.amount(),
            totals.subtotal.amount() + totals.delivery_fee.amount()
        );
    }

    #[test]
    fn test_unpriced_line_contributes_nothing() {
        let mut cart = Cart::new();
        cart.add_line(line("ghost", 5)).unwrap();
        let totals = cart.totals(|_| None);
        assert!(totals.subtotal.is_zero());
    }
}
