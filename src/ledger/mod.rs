//! Debt ledger engine
//!
//! Everything here is recomputed from the raw records on every query:
//!
//! 1. [`gross::build_gross`] turns expenses into who-owes-whom debts
//! 2. [`reduce::apply_settlements`] subtracts recorded payments
//! 3. [`simplify::net_balances`] and [`simplify::simplify`] collapse the
//!    result into one balance per user and a minimal transfer plan
//! 4. [`balance`] answers the per-user questions
//!
//! The stages are pure functions over a borrowed [`LedgerContext`].

pub mod balance;
pub mod gross;
pub mod matrix;
pub mod reduce;
pub mod simplify;

use std::collections::BTreeMap;

use serde::Serialize;

pub use balance::{pending_for, summarize, BalanceSummary, PendingTransfers};
pub use gross::build_gross;
pub use matrix::DebtMatrix;
pub use reduce::apply_settlements;
pub use simplify::{net_balances, simplify, Transfer};

use crate::models::{Expense, Settlement, UserId};

/// Amounts at or below this are treated as settled
pub const EPSILON: f64 = 0.01;

/// The records a computation reads
#[derive(Debug, Clone, Copy)]
pub struct LedgerContext<'a> {
    /// Known user ids; balances are reported for these only
    pub users: &'a [UserId],
    pub expenses: &'a [Expense],
    /// In record order
    pub settlements: &'a [Settlement],
    /// Fixed rate for expenses outside the common unit
    pub conversion_rate: f64,
}

/// Every derived view of the ledger at one point in time
#[derive(Debug, Clone, Serialize)]
pub struct LedgerSnapshot {
    pub gross: DebtMatrix,
    pub net: DebtMatrix,
    pub balances: BTreeMap<UserId, f64>,
    pub transfers: Vec<Transfer>,
    pub total_expenses: f64,
}

/// Run the whole pipeline
pub fn compute(ctx: &LedgerContext<'_>) -> LedgerSnapshot {
    let gross = build_gross(ctx.expenses, ctx.conversion_rate);
    let net = apply_settlements(&gross, ctx.settlements);
    let balances = net_balances(&net, ctx.users.iter().copied());
    let transfers = simplify(&balances);

    tracing::debug!(
        expenses = ctx.expenses.len(),
        settlements = ctx.settlements.len(),
        open_debts = net.len(),
        transfers = transfers.len(),
        "ledger recomputed"
    );

    LedgerSnapshot {
        total_expenses: balance::total_expenses(ctx.expenses, ctx.conversion_rate),
        gross,
        net,
        balances,
        transfers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, GroupId, Money, SettlementId, DEFAULT_CONVERSION_RATE};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn uid(n: u64) -> UserId {
        UserId::new(n)
    }

    fn expense(id: u64, cents: i64, payers: &[u64], participants: &[u64]) -> Expense {
        Expense::new(
            ExpenseId::new(id),
            GroupId::new(101),
            "Groceries",
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
            payers.iter().copied().map(UserId::new).collect(),
            participants.iter().copied().map(UserId::new).collect(),
        )
    }

    fn paid(id: u64, from: u64, to: u64, cents: i64) -> Settlement {
        Settlement::new(
            SettlementId::new(id),
            uid(from),
            uid(to),
            Money::from_cents(cents),
            "Cash",
            uid(from),
        )
    }

    fn run(users: &[UserId], expenses: &[Expense], settlements: &[Settlement]) -> LedgerSnapshot {
        compute(&LedgerContext {
            users,
            expenses,
            settlements,
            conversion_rate: DEFAULT_CONVERSION_RATE,
        })
    }

    #[test]
    fn test_settle_up_flow() {
        let users = [uid(1), uid(2), uid(3)];
        let expenses = [expense(1, 30000, &[1], &[1, 2, 3])];

        let before = run(&users, &expenses, &[]);
        assert_eq!(before.total_expenses, 300.0);
        assert_eq!(summarize(&before, uid(1)).lent, 200.0);
        assert_eq!(before.transfers.len(), 2);

        let after = run(&users, &expenses, &[paid(1, 2, 1, 10000)]);
        assert_eq!(summarize(&after, uid(2)).owe, 0.0);
        assert_eq!(summarize(&after, uid(1)).lent, 100.0);
        assert_eq!(after.total_expenses, 300.0);
        assert_eq!(
            after.transfers,
            vec![Transfer {
                payer: uid(3),
                recipient: uid(1),
                amount: 100.0
            }]
        );
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let users = [uid(1), uid(2), uid(3)];
        let expenses = [
            expense(1, 30000, &[1], &[1, 2, 3]),
            expense(2, 12000, &[2], &[1, 2]),
        ];
        let settlements = [paid(1, 3, 1, 5000)];

        let a = run(&users, &expenses, &settlements);
        let b = run(&users, &expenses, &settlements);
        assert_eq!(a.net, b.net);
        assert_eq!(a.transfers, b.transfers);
    }

    prop_compose! {
        fn arb_expense(users: u64)(
            id in 1u64..1000,
            cents in 1i64..500_000,
            payer in 1..=users,
            participants in proptest::collection::btree_set(1..=users, 1..4usize),
        ) -> Expense {
            let participants: Vec<u64> = participants.into_iter().collect();
            expense(id, cents, &[payer], &participants)
        }
    }

    proptest! {
        #[test]
        fn prop_balances_sum_to_zero(expenses in proptest::collection::vec(arb_expense(5), 0..12)) {
            let users: Vec<UserId> = (1..=5).map(uid).collect();
            let snapshot = run(&users, &expenses, &[]);

            let sum: f64 = snapshot.balances.values().sum();
            prop_assert!(sum.abs() < 1e-6);
        }

        #[test]
        fn prop_plan_clears_balances(expenses in proptest::collection::vec(arb_expense(5), 1..12)) {
            let users: Vec<UserId> = (1..=5).map(uid).collect();
            let snapshot = run(&users, &expenses, &[]);

            let mut remaining = snapshot.balances.clone();
            for t in &snapshot.transfers {
                prop_assert!(t.amount > EPSILON);
                *remaining.entry(t.recipient).or_insert(0.0) -= t.amount;
                *remaining.entry(t.payer).or_insert(0.0) += t.amount;
            }
            for b in remaining.values() {
                prop_assert!(b.abs() < 0.1);
            }

            let active = snapshot.balances.values().filter(|b| b.abs() > EPSILON).count();
            prop_assert!(snapshot.transfers.len() <= active.saturating_sub(1));
        }

        #[test]
        fn prop_settlements_never_increase_debt(
            expenses in proptest::collection::vec(arb_expense(4), 1..8),
            from in 1u64..=4,
            to in 1u64..=4,
            cents in 1i64..200_000,
        ) {
            let users: Vec<UserId> = (1..=4).map(uid).collect();
            let before = run(&users, &expenses, &[]);
            let after = run(&users, &expenses, &[paid(1, from, to, cents)]);

            for (debtor, creditor, amount) in after.net.entries() {
                let prior = before.net.get(debtor, creditor).unwrap_or(0.0);
                prop_assert!(amount <= prior + 1e-9);
            }
            prop_assert!(after.net.total() <= before.net.total() + 1e-9);

            let again = run(&users, &expenses, &[paid(1, from, to, cents)]);
            prop_assert_eq!(after.net, again.net);
        }
    }
}
