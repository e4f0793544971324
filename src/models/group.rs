//! Group model
//!
//! A set of users sharing expenses (a trip, a flat, a dinner club).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::Currency;
use super::ids::{GroupId, UserId};
use super::money::Money;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,

    pub name: String,

    /// Member ids in the order they were added
    pub members: Vec<UserId>,

    /// The user who created the group; always a member
    pub admin_id: UserId,

    /// Base currency for the group's expenses
    #[serde(default)]
    pub currency: Currency,

    /// Running total of raw expense amounts, kept in sync on add/delete
    #[serde(default)]
    pub total_expense: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Create a group. The admin is appended to the member list if missing.
    pub fn new(
        id: GroupId,
        name: impl Into<String>,
        admin_id: UserId,
        members: Vec<UserId>,
        currency: Currency,
    ) -> Self {
        let mut group = Self {
            id,
            name: name.into(),
            members: Vec::new(),
            admin_id,
            currency,
            total_expense: Money::zero(),
            start_date: None,
            end_date: None,
            created_at: Utc::now(),
        };
        group.set_members(members);
        group
    }

    /// Replace the member list, dropping duplicates and re-adding the admin
    pub fn set_members(&mut self, members: Vec<UserId>) {
        let mut unique = Vec::with_capacity(members.len() + 1);
        for id in members {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        if !unique.contains(&self.admin_id) {
            unique.push(self.admin_id);
        }
        self.members = unique;
    }

    /// Member list with the admin guaranteed present.
    ///
    /// Stored data written by older versions may have lost the admin; this
    /// repairs the view without touching the record.
    pub fn effective_members(&self) -> Vec<UserId> {
        let mut members = self.members.clone();
        if !members.contains(&self.admin_id) {
            members.push(self.admin_id);
        }
        members
    }

    pub fn is_member(&self, user_id: UserId) -> bool {
        user_id == self.admin_id || self.members.contains(&user_id)
    }

    pub fn record_expense(&mut self, amount: Money) {
        self.total_expense += amount;
    }

    pub fn remove_expense(&mut self, amount: Money) {
        self.total_expense -= amount;
    }

    pub fn validate(&self) -> Result<(), GroupValidationError> {
        if self.name.trim().is_empty() {
            return Err(GroupValidationError::EmptyName);
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(GroupValidationError::EndBeforeStart);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} members, {})", self.name, self.members.len(), self.currency)
    }
}

/// Validation errors for groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupValidationError {
    EmptyName,
    EndBeforeStart,
}

impl fmt::Display for GroupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Group name cannot be empty"),
            Self::EndBeforeStart => write!(f, "Group end date is before its start date"),
        }
    }
}

impl std::error::Error for GroupValidationError {}
