//! Invoice - the billable record moved through the pipeline
//!
//! A value object: a customer/amount pair, immutable once built, compared by value.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ContractError;

/// Billable record
///
/// Fields are private so every instance went through [`Invoice::new`]: the customer is a
/// non-empty identifier and the amount is non-negative. Deserialization takes the same
/// path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInvoice")]
pub struct Invoice {
    customer: String,
    amount: Decimal,
}

impl Invoice {
    /// Create a validated invoice
    ///
    /// # Errors
    /// `ContractError::InvalidInvoice` for a blank customer or a negative amount
    pub fn new(customer: impl Into<String>, amount: Decimal) -> Result<Self, ContractError> {
        let customer = customer.into();

        if customer.trim().is_empty() {
            return Err(ContractError::invalid_invoice(
                customer,
                "customer cannot be empty",
            ));
        }
        if amount < Decimal::ZERO {
            return Err(ContractError::invalid_invoice(
                customer,
                format!("amount must be >= 0, got {amount}"),
            ));
        }

        Ok(Self { customer, amount })
    }

    /// Customer identifier
    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// Invoice amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Whether the amount is strictly below `threshold`
    pub fn is_below(&self, threshold: Decimal) -> bool {
        self.amount < threshold
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.customer, self.amount)
    }
}

#[derive(Deserialize)]
struct RawInvoice {
    customer: String,
    amount: Decimal,
}

impl TryFrom<RawInvoice> for Invoice {
    type Error = ContractError;

    fn try_from(raw: RawInvoice) -> Result<Self, Self::Error> {
        Invoice::new(raw.customer, raw.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_new_valid() {
        let invoice = Invoice::new("A", Decimal::from(50)).unwrap();
        assert_eq!(invoice.customer(), "A");
        assert_eq!(invoice.amount(), Decimal::from(50));
    }

    #[test]
    fn test_invoice_zero_amount_allowed() {
        assert!(Invoice::new("free", Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_invoice_rejects_blank_customer() {
        let err = Invoice::new("  ", Decimal::from(10)).unwrap_err();
        assert!(matches!(err, ContractError::InvalidInvoice { .. }));
        assert!(err.to_string().contains("customer cannot be empty"));
    }

    #[test]
    fn test_invoice_rejects_negative_amount() {
        let err = Invoice::new("A", Decimal::from(-1)).unwrap_err();
        assert!(err.to_string().contains("amount must be >= 0"), "got: {err}");
    }

    #[test]
    fn test_invoice_value_equality() {
        // 50 and 50.00 are the same amount
        let a = Invoice::new("A", Decimal::from(50)).unwrap();
        let b = Invoice::new("A", Decimal::new(5000, 2)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Invoice::new("B", Decimal::from(50)).unwrap());
    }

    #[test]
    fn test_is_below_is_strict() {
        let invoice = Invoice::new("edge", Decimal::ONE_HUNDRED).unwrap();
        assert!(!invoice.is_below(Decimal::ONE_HUNDRED));
        assert!(invoice.is_below(Decimal::from(101)));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Invoice = serde_json::from_str(r#"{"customer":"C","amount":99.5}"#).unwrap();
        assert_eq!(ok.amount(), Decimal::new(995, 1));

        let bad = serde_json::from_str::<Invoice>(r#"{"customer":"C","amount":-3}"#);
        assert!(bad.is_err());
    }
}
