//! Expense model
//!
//! An amount fronted by one or more payers on behalf of one or more
//! participants. Expenses are immutable once recorded; they can only be
//! removed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::currency::Currency;
use super::ids::{ExpenseId, GroupId, UserId};
use super::money::Money;

/// Largest difference (in cents) tolerated between a custom breakdown and the
/// expense amount
pub const SPLIT_TOLERANCE_CENTS: i64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    pub group_id: GroupId,

    pub description: String,

    /// Amount in `currency`; always positive
    pub amount: Money,

    #[serde(default)]
    pub currency: Currency,

    pub date: NaiveDate,

    /// Who fronted the money
    pub payer_ids: Vec<UserId>,

    /// Who benefits from (and owes a share of) the expense
    pub participants: Vec<UserId>,

    /// Participant → owed amount. When absent the split is equal; when present,
    /// participants missing from the map owe nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_split_shares: Option<BTreeMap<UserId, Money>>,

    /// Payer → contributed amount. When absent payers contributed equally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_payer_contributions: Option<BTreeMap<UserId, Money>>,

    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create an equally split expense
    pub fn new(
        id: ExpenseId,
        group_id: GroupId,
        description: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        payer_ids: Vec<UserId>,
        participants: Vec<UserId>,
    ) -> Self {
        Self {
            id,
            group_id,
            description: description.into(),
            amount,
            currency: Currency::COMMON,
            date,
            payer_ids,
            participants,
            custom_split_shares: None,
            custom_payer_contributions: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_split_shares(mut self, shares: BTreeMap<UserId, Money>) -> Self {
        self.custom_split_shares = Some(shares);
        self
    }

    pub fn with_payer_contributions(mut self, contributions: BTreeMap<UserId, Money>) -> Self {
        self.custom_payer_contributions = Some(contributions);
        self
    }

    pub fn is_multi_payer(&self) -> bool {
        self.payer_ids.len() > 1
    }

    /// Check the creation-time invariants. Stored expenses are not re-validated.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        if self.payer_ids.is_empty() {
            return Err(ExpenseValidationError::NoPayers);
        }

        if self.participants.is_empty() {
            return Err(ExpenseValidationError::NoParticipants);
        }

        if let Some(shares) = &self.custom_split_shares {
            check_breakdown(shares, &self.participants, self.amount, Breakdown::Split)?;
        }

        match &self.custom_payer_contributions {
            Some(contributions) => {
                check_breakdown(contributions, &self.payer_ids, self.amount, Breakdown::Paid)?;
            }
            None if self.is_multi_payer() => {
                return Err(ExpenseValidationError::MissingContributions);
            }
            None => {}
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date, self.description, self.amount, self.currency
        )
    }
}

/// Which custom breakdown a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakdown {
    /// Owed shares per participant
    Split,
    /// Contributions per payer
    Paid,
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Split => write!(f, "Custom shares"),
            Self::Paid => write!(f, "Payer contributions"),
        }
    }
}

fn check_breakdown(
    entries: &BTreeMap<UserId, Money>,
    allowed: &[UserId],
    amount: Money,
    kind: Breakdown,
) -> Result<(), ExpenseValidationError> {
    if let Some((id, value)) = entries.iter().find(|(_, v)| v.is_negative()) {
        return Err(ExpenseValidationError::NegativeEntry(kind, *id, *value));
    }

    if let Some(id) = entries.keys().find(|id| !allowed.contains(id)) {
        return Err(ExpenseValidationError::UnknownEntry(kind, *id));
    }

    let total: Money = entries.values().sum();
    if (total - amount).abs().cents() > SPLIT_TOLERANCE_CENTS {
        return Err(ExpenseValidationError::TotalMismatch {
            kind,
            total,
            amount,
        });
    }

    Ok(())
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NonPositiveAmount(Money),
    NoPayers,
    NoParticipants,
    MissingContributions,
    NegativeEntry(Breakdown, UserId, Money),
    UnknownEntry(Breakdown, UserId),
    TotalMismatch {
        kind: Breakdown,
        total: Money,
        amount: Money,
    },
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Expense description cannot be empty"),
            Self::NonPositiveAmount(a) => write!(f, "Expense amount must be positive, got {}", a),
            Self::NoPayers => write!(f, "Select at least one person who paid"),
            Self::NoParticipants => write!(f, "Select at least one participant"),
            Self::MissingContributions => {
                write!(f, "Payer contributions are required when several people paid")
            }
            Self::NegativeEntry(kind, id, v) => {
                write!(f, "{} cannot be negative (user {}: {})", kind, id, v)
            }
            Self::UnknownEntry(Breakdown::Split, id) => {
                write!(f, "User {} has a custom share but is not a participant", id)
            }
            Self::UnknownEntry(Breakdown::Paid, id) => {
                write!(f, "User {} has a contribution but is not a payer", id)
            }
            Self::TotalMismatch {
                kind,
                total,
                amount,
            } => write!(
                f,
                "{} don't match expense amount ({} entered, {} expected)",
                kind, total, amount
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
