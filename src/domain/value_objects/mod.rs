//! Value objects shared across the storefront domain

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Money value object. Storefront prices are quoted in Malaysian Ringgit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self { amount, currency: currency.to_string() }
    }
    pub fn myr(amount: Decimal) -> Self { Self::new(amount, "MYR") }
    pub fn zero(currency: &str) -> Self { Self::new(Decimal::ZERO, currency) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &str { &self.currency }
    pub fn is_zero(&self) -> bool { self.amount.is_zero() }

    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch);
        }
        Ok(Money::new(self.amount + other.amount, &self.currency))
    }

    pub fn multiply(&self, qty: u32) -> Money {
        Money::new(self.amount * Decimal::from(qty), &self.currency)
    }
}

impl Default for Money {
    fn default() -> Self { Self::zero("MYR") }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.currency == "MYR" {
            write!(f, "RM{:.2}", self.amount)
        } else {
            write!(f, "{} {:.2}", self.currency, self.amount)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("currency mismatch")]
    CurrencyMismatch,
}

/// Human-facing order number: "FB" plus the last six digits of the
/// creation timestamp in epoch milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderNumber(String);

impl OrderNumber {
    pub fn generate_at(created_at: DateTime<Utc>) -> Self {
        let millis = created_at.timestamp_millis().unsigned_abs().to_string();
        let suffix = if millis.len() > 6 { &millis[millis.len() - 6..] } else { &millis };
        Self(format!("FB{suffix}"))
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_money_add() {
        let a = Money::myr(Decimal::new(100, 0));
        let b = Money::myr(Decimal::new(50, 0));
        assert_eq!(a.add(&b).unwrap().amount(), Decimal::new(150, 0));
    }

    #[test]
    fn test_money_currency_mismatch() {
        let a = Money::myr(Decimal::ONE);
        let b = Money::new(Decimal::ONE, "SGD");
        assert_eq!(a.add(&b), Err(MoneyError::CurrencyMismatch));
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::myr(Decimal::new(15550, 2)).to_string(), "RM155.50");
    }

    #[test]
    fn test_order_number_suffix() {
        let at = Utc.timestamp_millis_opt(1_700_000_123_456).unwrap();
        let n = OrderNumber::generate_at(at);
        assert_eq!(n.as_str(), "FB123456");
    }

}
