//! Display formatting for terminal output
//!
//! Provides utilities for formatting users, groups, expenses, settlements and
//! balances for terminal display. Records hold user ids; callers pass a
//! [`Names`] lookup built from the user list so rows show names instead.

pub mod balance;
pub mod expense;
pub mod group;
pub mod report;
pub mod settlement;
pub mod user;

use std::collections::HashMap;

use crate::models::{User, UserId};

pub use balance::{format_pending, format_summary, format_transfer_plan};
pub use expense::{format_expense_details, format_expense_list};
pub use group::{format_group_details, format_group_list};
pub use report::{format_group_spending, format_top_spenders};
pub use settlement::format_settlement_history;
pub use user::{format_user_details, format_user_list};

/// User id to display name
#[derive(Debug, Clone, Default)]
pub struct Names(HashMap<UserId, String>);

impl Names {
    pub fn from_users(users: &[User]) -> Self {
        Self(users.iter().map(|u| (u.id, u.name.clone())).collect())
    }

    /// Name for `id`, or "Unknown" for ids with no user record
    pub fn get(&self, id: UserId) -> &str {
        self.0.get(&id).map(String::as_str).unwrap_or("Unknown")
    }

    pub fn join(&self, ids: &[UserId]) -> String {
        ids.iter()
            .map(|id| self.get(*id))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
