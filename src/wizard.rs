//! Custom arrangement wizard
//!
//! Four linear steps: color mood, flowers, fruits, contact details. Steps
//! 1-3 require a non-empty selection, step 4 requires every contact field.
//! The color mood is single-select: picking the current mood clears it,
//! picking another replaces it. Submission produces a persisted
//! CustomRequest rather than the original's console log.

use crate::domain::events::{CustomRequestEvent, DomainEvent};
use crate::error::{Result, StoreError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const BASE_COST: u32 = 80;
pub const FRUIT_UNIT_COST: u32 = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    ColorMood,
    Flowers,
    Fruits,
    Contact,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FruitSelection {
    pub id: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WizardSelections {
    pub colors: Vec<String>,
    pub flowers: Vec<String>,
    pub fruits: Vec<FruitSelection>,
    pub buyer_name: String,
    pub whatsapp_number: String,
    pub occasion: String,
    pub delivery_date: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug)]
pub struct ArrangementWizard {
    step: WizardStep,
    selections: WizardSelections,
}

impl Default for ArrangementWizard {
    fn default() -> Self {
        Self { step: WizardStep::ColorMood, selections: WizardSelections::default() }
    }
}

impl ArrangementWizard {
    pub fn new() -> Self { Self::default() }

    /// Restores a wizard from submitted selections, e.g. when the client
    /// sends the whole form at once.
    pub fn with_selections(selections: WizardSelections) -> Self {
        Self { step: WizardStep::ColorMood, selections }
    }

    pub fn step(&self) -> WizardStep { self.step }
    pub fn selections(&self) -> &WizardSelections { &self.selections }

    /// Single-select toggle: the current mood clears, another replaces.
    pub fn pick_color_mood(&mut self, name: &str) {
        if self.selections.colors.iter().any(|c| c == name) {
            self.selections.colors.clear();
        } else {
            self.selections.colors = vec![name.to_string()];
        }
    }

    pub fn toggle_flower(&mut self, id: &str) {
        if let Some(pos) = self.selections.flowers.iter().position(|f| f == id) {
            self.selections.flowers.remove(pos);
        } else {
            self.selections.flowers.push(id.to_string());
        }
    }

    pub fn set_fruit_quantity(&mut self, id: &str, quantity: u32) {
        match self.selections.fruits.iter_mut().find(|f| f.id == id) {
            Some(f) => f.quantity = quantity,
            None => self.selections.fruits.push(FruitSelection { id: id.to_string(), quantity }),
        }
    }

    pub fn set_contact(
        &mut self,
        buyer_name: &str,
        whatsapp_number: &str,
        occasion: &str,
        delivery_date: &str,
        message: &str,
    ) {
        self.selections.buyer_name = buyer_name.to_string();
        self.selections.whatsapp_number = whatsapp_number.to_string();
        self.selections.occasion = occasion.to_string();
        self.selections.delivery_date = delivery_date.to_string();
        self.selections.message = message.to_string();
    }

    pub fn can_proceed(&self) -> bool {
        let s = &self.selections;
        match self.step {
            WizardStep::ColorMood => !s.colors.is_empty(),
            WizardStep::Flowers => !s.flowers.is_empty(),
            WizardStep::Fruits => s.fruits.iter().any(|f| f.quantity > 0),
            WizardStep::Contact => {
                !s.buyer_name.is_empty()
                    && !s.whatsapp_number.is_empty()
                    && !s.occasion.is_empty()
                    && !s.delivery_date.is_empty()
            }
        }
    }

    pub fn advance(&mut self) -> Result<WizardStep> {
        if !self.can_proceed() {
            return Err(StoreError::IncompleteWizardStep);
        }
        self.step = match self.step {
            WizardStep::ColorMood => WizardStep::Flowers,
            WizardStep::Flowers => WizardStep::Fruits,
            WizardStep::Fruits => WizardStep::Contact,
            WizardStep::Contact => WizardStep::Contact,
        };
        Ok(self.step)
    }

    pub fn back(&mut self) -> WizardStep {
        self.step = match self.step {
            WizardStep::ColorMood => WizardStep::ColorMood,
            WizardStep::Flowers => WizardStep::ColorMood,
            WizardStep::Fruits => WizardStep::Flowers,
            WizardStep::Contact => WizardStep::Fruits,
        };
        self.step
    }

    pub fn estimated_cost(&self) -> Decimal {
        estimate_cost(&self.selections.fruits)
    }

    /// Validates every step in order and produces the request record.
    pub fn submit(mut self, customer_id: Option<String>) -> Result<CustomRequest> {
        while self.step != WizardStep::Contact {
            self.advance()?;
        }
        if !self.can_proceed() {
            return Err(StoreError::IncompleteWizardStep);
        }
        Ok(CustomRequest::new(self.selections, customer_id))
    }
}

pub fn estimate_cost(fruits: &[FruitSelection]) -> Decimal {
    let fruit_cost: u32 = fruits.iter().map(|f| f.quantity * FRUIT_UNIT_COST).sum();
    Decimal::from(BASE_COST + fruit_cost)
}

/// A submitted custom arrangement request, waiting for the shop to quote
/// and collect a deposit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomRequest {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub selections: WizardSelections,
    pub estimated_cost: Decimal,
    pub deposit_status: DepositStatus,
    pub status: RequestStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Draft,
    Confirmed,
    InProgress,
    Delivered,
}

impl CustomRequest {
    fn new(selections: WizardSelections, customer_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            customer_id,
            estimated_cost: estimate_cost(&selections.fruits),
            selections,
            deposit_status: DepositStatus::Pending,
            status: RequestStatus::Draft,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn submitted_event(&self) -> DomainEvent {
        DomainEvent::CustomRequest(CustomRequestEvent::Submitted {
            request_id: self.id.clone(),
            estimated_cost: self.estimated_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ArrangementWizard {
        let mut w = ArrangementWizard::new();
        w.pick_color_mood("Soft Blush");
        w.toggle_flower("roses");
        w.set_fruit_quantity("strawberries", 2);
        w.set_contact("Maya", "60123456789", "Birthday", "2026-09-01", "Happy birthday!");
        w
    }

    #[test]
    fn test_estimate_base_plus_fruit() {
        let mut w = ArrangementWizard::new();
        assert_eq!(w.estimated_cost(), Decimal::from(80));
        w.set_fruit_quantity("strawberries", 2);
        w.set_fruit_quantity("apples", 1);
        assert_eq!(w.estimated_cost(), Decimal::from(80 + 3 * 15));
    }

    #[test]
    fn test_color_mood_is_single_select_toggle() {
        let mut w = ArrangementWizard::new();
        w.pick_color_mood("Soft Blush");
        w.pick_color_mood("Warm Sunset");
        assert_eq!(w.selections().colors, vec!["Warm Sunset".to_string()]);
        w.pick_color_mood("Warm Sunset");
        assert!(w.selections().colors.is_empty());
    }

    #[test]
    fn test_step_gating() {
        let mut w = ArrangementWizard::new();
        assert!(w.advance().is_err());
        w.pick_color_mood("Soft Blush");
        assert_eq!(w.advance().unwrap(), WizardStep::Flowers);
        assert!(w.advance().is_err());
        w.toggle_flower("roses");
        assert_eq!(w.advance().unwrap(), WizardStep::Fruits);
        // A zero-quantity fruit does not satisfy step three.
        w.set_fruit_quantity("apples", 0);
        assert!(w.advance().is_err());
        w.set_fruit_quantity("apples", 1);
        assert_eq!(w.advance().unwrap(), WizardStep::Contact);
    }

    #[test]
    fn test_back_walks_to_first_step() {
        let mut w = filled();
        w.advance().unwrap();
        w.advance().unwrap();
        assert_eq!(w.back(), WizardStep::Flowers);
        assert_eq!(w.back(), WizardStep::ColorMood);
        assert_eq!(w.back(), WizardStep::ColorMood);
    }

    #[test]
    fn test_submit_produces_pending_draft_request() {
        let request = filled().submit(Some("1".into())).unwrap();
        assert_eq!(request.deposit_status, DepositStatus::Pending);
        assert_eq!(request.status, RequestStatus::Draft);
        assert_eq!(request.estimated_cost, Decimal::from(80 + 2 * 15));
        assert_eq!(request.customer_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_submit_rejects_missing_contact() {
        let mut w = ArrangementWizard::new();
        w.pick_color_mood("Soft Blush");
        w.toggle_flower("roses");
        w.set_fruit_quantity("apples", 1);
        assert!(w.submit(None).is_err());
    }
}
