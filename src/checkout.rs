//! Checkout flow
//!
//! A linear three-step machine: customer info, delivery info, review.
//! `advance` refuses to move past a step whose fields are incomplete;
//! `back` is a plain decrement. Completion is only possible on the review
//! step and builds the order snapshot from the cart at that instant. The
//! caller persists the order BEFORE clearing the cart, so a storage
//! failure cannot lose both.

use crate::domain::aggregates::cart::{CartLine, CartTotals};
use crate::domain::aggregates::order::{DeliveryAddress, Order, OrderDetails};
use crate::error::{Result, StoreError};
use crate::session::User;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    CustomerInfo,
    DeliveryInfo,
    Review,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: DeliveryAddress,
    pub delivery_date: String,
    pub delivery_time: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub as_guest: bool,
}

#[derive(Clone, Debug)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    form: CheckoutForm,
}

impl CheckoutFlow {
    pub fn new(form: CheckoutForm) -> Self {
        Self { step: CheckoutStep::CustomerInfo, form }
    }

    pub fn step(&self) -> CheckoutStep { self.step }
    pub fn form(&self) -> &CheckoutForm { &self.form }

    pub fn can_proceed(&self) -> bool {
        let f = &self.form;
        match self.step {
            CheckoutStep::CustomerInfo => {
                !f.customer_name.is_empty()
                    && !f.customer_email.is_empty()
                    && !f.customer_phone.is_empty()
            }
            CheckoutStep::DeliveryInfo => {
                let a = &f.delivery_address;
                !a.name.is_empty()
                    && !a.phone.is_empty()
                    && !a.address.is_empty()
                    && !a.city.is_empty()
                    && !a.postcode.is_empty()
                    && !a.state.is_empty()
                    && !f.delivery_date.is_empty()
                    && !f.delivery_time.is_empty()
            }
            CheckoutStep::Review => true,
        }
    }

    pub fn advance(&mut self) -> Result<CheckoutStep> {
        if !self.can_proceed() {
            return Err(StoreError::IncompleteStep);
        }
        self.step = match self.step {
            CheckoutStep::CustomerInfo => CheckoutStep::DeliveryInfo,
            CheckoutStep::DeliveryInfo => CheckoutStep::Review,
            CheckoutStep::Review => CheckoutStep::Review,
        };
        Ok(self.step)
    }

    pub fn back(&mut self) -> CheckoutStep {
        self.step = match self.step {
            CheckoutStep::CustomerInfo => CheckoutStep::CustomerInfo,
            CheckoutStep::DeliveryInfo => CheckoutStep::CustomerInfo,
            CheckoutStep::Review => CheckoutStep::DeliveryInfo,
        };
        self.step
    }

    /// Builds the order from the review step. `items` and `totals` are the
    /// cart snapshot the caller took; mutating the cart afterwards cannot
    /// change the order.
    pub fn complete(
        self,
        user: Option<&User>,
        items: Vec<CartLine>,
        totals: CartTotals,
    ) -> Result<Order> {
        if self.step != CheckoutStep::Review {
            return Err(StoreError::IncompleteStep);
        }
        let f = self.form;
        let details = OrderDetails {
            customer_id: user.map(|u| u.id.clone()),
            customer_name: f.customer_name,
            customer_email: f.customer_email,
            customer_phone: f.customer_phone,
            is_guest: f.as_guest || user.is_none(),
            delivery_address: f.delivery_address,
            delivery_date: f.delivery_date,
            delivery_time: f.delivery_time,
            notes: f.notes,
        };
        Ok(Order::place(details, items, totals)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Money;
    use rust_decimal::Decimal;

    fn filled_form() -> CheckoutForm {
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

    fn totals() -> CartTotals {
        CartTotals {
            subtotal: Money::myr(Decimal::from(140)),
            delivery_fee: Money::myr(Decimal::from(15)),
            total: Money::myr(Decimal::from(155)),
        }
    }

    fn one_line() -> Vec<CartLine> {
        vec![CartLine { product_id: "1".into(), quantity: 1, customizations: None }]
    }

    #[test]
    fn test_advance_through_all_steps() {
        let mut flow = CheckoutFlow::new(filled_form());
        assert_eq!(flow.advance().unwrap(), CheckoutStep::DeliveryInfo);
        assert_eq!(flow.advance().unwrap(), CheckoutStep::Review);
    }

    #[test]
    fn test_incomplete_customer_info_blocks_advance() {
        let mut form = filled_form();
        form.customer_email.clear();
        let mut flow = CheckoutFlow::new(form);
        assert!(flow.advance().is_err());
        assert_eq!(flow.step(), CheckoutStep::CustomerInfo);
    }

    #[test]
    fn test_incomplete_delivery_info_blocks_advance() {
        let mut form = filled_form();
        form.delivery_address.postcode.clear();
        let mut flow = CheckoutFlow::new(form);
        flow.advance().unwrap();
        assert!(flow.advance().is_err());
        assert_eq!(flow.step(), CheckoutStep::DeliveryInfo);
    }

    #[test]
    fn test_back_has_no_guard() {
        let mut flow = CheckoutFlow::new(filled_form());
        flow.advance().unwrap();
        assert_eq!(flow.back(), CheckoutStep::CustomerInfo);
        assert_eq!(flow.back(), CheckoutStep::CustomerInfo);
    }

    #[test]
    fn test_complete_requires_review_step() {
        let flow = CheckoutFlow::new(filled_form());
        assert!(flow.complete(None, one_line(), totals()).is_err());
    }

    #[test]
    fn test_complete_builds_guest_order() {
        let mut flow = CheckoutFlow::new(filled_form());
        flow.advance().unwrap();
        flow.advance().unwrap();
        let order = flow.complete(None, one_line(), totals()).unwrap();
        assert!(order.is_guest());
        assert!(order.customer_id().is_none());
        assert_eq!(order.total().amount(), Decimal::from(155));
    }
}
