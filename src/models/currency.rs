//! Currencies and normalization to the ledger's common unit

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed rate used to bring foreign expenses into the common unit.
///
/// This is a hardcoded approximation, not a live exchange rate; balances in
/// mixed-currency groups are only as accurate as this constant.
pub const DEFAULT_CONVERSION_RATE: f64 = 83.5;

/// Supported expense currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indian Rupee, the common unit all balances are reported in
    #[default]
    Inr,
    /// US Dollar
    Usd,
}

impl Currency {
    /// The unit every derived balance is expressed in
    pub const COMMON: Currency = Currency::Inr;

    pub fn code(&self) -> &'static str {
        match self {
            Self::Inr => "INR",
            Self::Usd => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Inr => "₹",
            Self::Usd => "$",
        }
    }

    /// Parse a currency code (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "INR" | "₹" => Some(Self::Inr),
            "USD" | "$" => Some(Self::Usd),
            _ => None,
        }
    }

    /// Convert an amount in this currency to the common unit
    pub fn normalize(&self, amount: f64, rate: f64) -> f64 {
        if *self == Self::COMMON {
            amount
        } else {
            amount * rate
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
