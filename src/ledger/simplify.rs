//! Net balances and the minimum transfer plan
//!
//! Collapses the pairwise net matrix into one balance per user, then matches
//! the largest creditors with the largest debtors greedily.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::UserId;

use super::matrix::DebtMatrix;
use super::EPSILON;

/// One payment in the simplified plan: `payer` sends `amount` to `recipient`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transfer {
    pub payer: UserId,
    pub recipient: UserId,
    pub amount: f64,
}

/// Net position per known user: positive means the user is owed money.
///
/// Every user in `users` gets an entry, starting at zero. Matrix entries that
/// name an unknown id only count for the side that is known.
pub fn net_balances<I>(net: &DebtMatrix, users: I) -> BTreeMap<UserId, f64>
where
    I: IntoIterator<Item = UserId>,
{
    let mut balances: BTreeMap<UserId, f64> = users.into_iter().map(|id| (id, 0.0)).collect();

    for (debtor, creditor, amount) in net.entries() {
        if let Some(balance) = balances.get_mut(&creditor) {
            *balance += amount;
        }
        if let Some(balance) = balances.get_mut(&debtor) {
            *balance -= amount;
        }
    }

    balances
}

/// Greedy transfer plan that clears every balance above the threshold.
///
/// Creditors are taken largest first and debtors most negative first; equal
/// balances keep ascending user id order. Produces at most
/// `creditors + debtors - 1` transfers.
pub fn simplify(balances: &BTreeMap<UserId, f64>) -> Vec<Transfer> {
    let active = balances
        .iter()
        .filter(|(_, b)| b.abs() > EPSILON)
        .map(|(id, b)| (*id, *b));

    let (mut givers, mut takers): (Vec<_>, Vec<_>) = active.partition(|(_, b)| *b > 0.0);
    givers.sort_by(|a, b| b.1.total_cmp(&a.1));
    takers.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut transfers = Vec::new();
    let (mut g, mut t) = (0, 0);

    while g < givers.len() && t < takers.len() {
        let (recipient, owed) = givers[g];
        let (payer, owing) = takers[t];

        let payment = owed.min(-owing);
        let paid = payment > EPSILON;
        if paid {
            transfers.push(Transfer {
                payer,
                recipient,
                amount: payment,
            });
            givers[g].1 -= payment;
            takers[t].1 += payment;
        }

        let giver_done = givers[g].1 < EPSILON;
        let taker_done = takers[t].1 > -EPSILON;

        if !paid && !giver_done && !taker_done {
            // both sides sit exactly on the threshold
            g += 1;
            t += 1;
            continue;
        }

        if giver_done {
            g += 1;
        }
        if taker_done {
            t += 1;
        }
    }

    transfers
}
