//! Top spenders by amount paid

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::SplitResult;
use crate::models::{Expense, User, UserId};
use crate::storage::Storage;

/// How many spenders the report keeps
pub const TOP_SPENDER_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct Spender {
    pub user: UserId,
    pub name: String,
    /// Rounded to whole units
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopSpenders {
    pub spenders: Vec<Spender>,
}

impl TopSpenders {
    pub fn generate(storage: &Storage, rate: f64) -> SplitResult<Self> {
        Ok(Self::from_records(
            &storage.expenses.get_all()?,
            &storage.users.get_all()?,
            rate,
        ))
    }

    /// Payers split an expense equally unless several paid with recorded
    /// contributions, in which case each is credited their contribution.
    pub fn from_records(expenses: &[Expense], users: &[User], rate: f64) -> Self {
        let mut totals: BTreeMap<UserId, f64> = BTreeMap::new();

        for expense in expenses {
            match &expense.custom_payer_contributions {
                Some(contributions) if expense.is_multi_payer() => {
                    for payer in &expense.payer_ids {
                        let paid = contributions.get(payer).map_or(0.0, |c| c.to_major());
                        *totals.entry(*payer).or_insert(0.0) += paid;
                    }
                }
                _ => {
                    if expense.payer_ids.is_empty() {
                        continue;
                    }
                    let amount = expense.currency.normalize(expense.amount.to_major(), rate);
                    let share = amount / expense.payer_ids.len() as f64;
                    for payer in &expense.payer_ids {
                        *totals.entry(*payer).or_insert(0.0) += share;
                    }
                }
            }
        }

        let mut spenders: Vec<Spender> = totals
            .into_iter()
            .filter(|(_, amount)| *amount >= 1.0)
            .map(|(id, amount)| Spender {
                user: id,
                name: users
                    .iter()
                    .find(|u| u.id == id)
                    .map(|u| u.name.clone())
                    .unwrap_or_else(|| "Unknown User".to_string()),
                amount: amount.round(),
            })
            .collect();

        spenders.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        spenders.truncate(TOP_SPENDER_LIMIT);

        Self { spenders }
    }
}
