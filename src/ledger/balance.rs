//! Per-user balance view
//!
//! What the dashboard and payment page show for the acting user.

use serde::Serialize;

use crate::models::{Expense, UserId};

use super::simplify::Transfer;
use super::LedgerSnapshot;

/// Dashboard figures for one user, in the common unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSummary {
    pub user: UserId,
    /// Sum of every expense, rounded to whole units; settlements don't change it
    pub total_expenses: f64,
    /// Owed to the user
    pub lent: f64,
    /// Owed by the user
    pub owe: f64,
}

impl BalanceSummary {
    pub fn net(&self) -> f64 {
        self.lent - self.owe
    }

    pub fn is_settled(&self) -> bool {
        self.lent == 0.0 && self.owe == 0.0
    }
}

/// Pending transfers touching one user, split by direction
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PendingTransfers {
    pub to_pay: Vec<Transfer>,
    pub to_receive: Vec<Transfer>,
}

/// Sum of all expense amounts normalized to the common unit, rounded
pub fn total_expenses(expenses: &[Expense], rate: f64) -> f64 {
    expenses
        .iter()
        .map(|e| e.currency.normalize(e.amount.to_major(), rate))
        .sum::<f64>()
        .round()
}

/// Summarize `user`'s position from a computed snapshot
pub fn summarize(snapshot: &LedgerSnapshot, user: UserId) -> BalanceSummary {
    let position = snapshot.net.owed_to(user) - snapshot.net.owed_by(user);

    BalanceSummary {
        user,
        total_expenses: snapshot.total_expenses,
        lent: position.max(0.0),
        owe: (-position).max(0.0),
    }
}

/// The planned transfers `user` has to make or will receive
pub fn pending_for(snapshot: &LedgerSnapshot, user: UserId) -> PendingTransfers {
    let (to_pay, to_receive) = snapshot
        .transfers
        .iter()
        .filter(|t| t.payer == user || t.recipient == user)
        .cloned()
        .partition(|t| t.payer == user);

    PendingTransfers { to_pay, to_receive }
}
