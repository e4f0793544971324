//! Settlement model
//!
//! A recorded payment from a debtor to a creditor. Settlements are the durable
//! record that turns gross debt into net debt; once written they are never
//! changed or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::Currency;
use super::ids::{SettlementId, UserId};
use super::money::Money;

/// Payment channel used when none is given
pub const DEFAULT_METHOD: &str = "Other";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settlement {
    pub id: SettlementId,

    /// The debtor who paid
    pub from: UserId,

    /// The creditor who was paid
    pub to: UserId,

    pub amount: Money,

    /// Settlements are always recorded in the common unit
    #[serde(default)]
    pub currency: Currency,

    /// Free-text description of how the money moved ("UPI", "Cash", ...)
    pub method: String,

    pub settled_at: DateTime<Utc>,

    /// Who recorded the payment
    pub settled_by: UserId,
}

impl Settlement {
    pub fn new(
        id: SettlementId,
        from: UserId,
        to: UserId,
        amount: Money,
        method: impl Into<String>,
        settled_by: UserId,
    ) -> Self {
        let method = method.into();
        Self {
            id,
            from,
            to,
            amount,
            currency: Currency::COMMON,
            method: if method.trim().is_empty() {
                DEFAULT_METHOD.to_string()
            } else {
                method
            },
            settled_at: Utc::now(),
            settled_by,
        }
    }

    pub fn validate(&self) -> Result<(), SettlementValidationError> {
        if !self.amount.is_positive() {
            return Err(SettlementValidationError::NonPositiveAmount(self.amount));
        }

        if self.from == self.to {
            return Err(SettlementValidationError::SelfPayment(self.from));
        }

        Ok(())
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: {} via {}",
            self.from, self.to, self.amount, self.method
        )
    }
}

/// Validation errors for settlements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementValidationError {
    NonPositiveAmount(Money),
    SelfPayment(UserId),
}

impl fmt::Display for SettlementValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(a) => write!(f, "Payment amount must be positive, got {}", a),
            Self::SelfPayment(id) => write!(f, "User {} cannot pay themselves", id),
        }
    }
}

impl std::error::Error for SettlementValidationError {}
