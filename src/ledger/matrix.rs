//! Sparse debtor → creditor matrix

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::UserId;

use super::EPSILON;

/// Amounts owed, keyed by debtor then creditor, in the common unit.
///
/// Rows and entries are ordered by user id. The builder never stores
/// self-loops or negative amounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DebtMatrix {
    rows: BTreeMap<UserId, BTreeMap<UserId, f64>>,
}

impl DebtMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount `debtor` owes `creditor`, if an entry exists
    pub fn get(&self, debtor: UserId, creditor: UserId) -> Option<f64> {
        self.rows.get(&debtor)?.get(&creditor).copied()
    }

    /// Accumulate debt onto the `debtor → creditor` entry
    pub fn add(&mut self, debtor: UserId, creditor: UserId, amount: f64) {
        if debtor == creditor {
            return;
        }
        *self
            .rows
            .entry(debtor)
            .or_default()
            .entry(creditor)
            .or_insert(0.0) += amount;
    }

    /// Reduce an existing entry by `amount`.
    ///
    /// An entry that falls below the threshold is removed, along with its row
    /// when that was the row's last entry. Missing entries are left alone, so
    /// paying more than is owed never creates a reverse debt.
    pub fn settle(&mut self, debtor: UserId, creditor: UserId, amount: f64) -> bool {
        let Some(row) = self.rows.get_mut(&debtor) else {
            return false;
        };
        let Some(entry) = row.get_mut(&creditor) else {
            return false;
        };

        *entry -= amount;
        if *entry < EPSILON {
            row.remove(&creditor);
            if row.is_empty() {
                self.rows.remove(&debtor);
            }
        }
        true
    }

    /// All entries as `(debtor, creditor, amount)`
    pub fn entries(&self) -> impl Iterator<Item = (UserId, UserId, f64)> + '_ {
        self.rows.iter().flat_map(|(debtor, row)| {
            row.iter()
                .map(move |(creditor, amount)| (*debtor, *creditor, *amount))
        })
    }

    /// Entries of one debtor
    pub fn row(&self, debtor: UserId) -> Option<&BTreeMap<UserId, f64>> {
        self.rows.get(&debtor)
    }

    /// Total `user` owes across all creditors
    pub fn owed_by(&self, user: UserId) -> f64 {
        self.rows
            .get(&user)
            .map(|row| row.values().sum())
            .unwrap_or(0.0)
    }

    /// Total owed to `user` across all debtors
    pub fn owed_to(&self, user: UserId) -> f64 {
        self.rows
            .values()
            .filter_map(|row| row.get(&user))
            .sum()
    }

    /// Sum of every entry
    pub fn total(&self) -> f64 {
        self.entries().map(|(_, _, amount)| amount).sum()
    }

    pub fn len(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(n: u64) -> UserId {
        UserId::new(n)
    }

    #[test]
    fn test_add_accumulates_and_skips_self_loops() {
        let mut m = DebtMatrix::new();
        m.add(uid(2), uid(1), 40.0);
        m.add(uid(2), uid(1), 10.0);
        m.add(uid(1), uid(1), 99.0);

        assert_eq!(m.get(uid(2), uid(1)), Some(50.0));
        assert_eq!(m.get(uid(1), uid(1)), None);
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_settle_removes_empty_rows() {
        let mut m = DebtMatrix::new();
        m.add(uid(3), uid(1), 150.0);

        assert!(m.settle(uid(3), uid(1), 100.0));
        assert_eq!(m.get(uid(3), uid(1)), Some(50.0));

        assert!(m.settle(uid(3), uid(1), 80.0));
        assert!(m.row(uid(3)).is_none());
        assert!(m.is_empty());

        assert!(!m.settle(uid(3), uid(1), 5.0));
        assert!(m.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut m = DebtMatrix::new();
        m.add(uid(3), uid(1), 150.0);
        m.add(uid(3), uid(2), 50.0);
        m.add(uid(2), uid(1), 25.0);

        assert_eq!(m.owed_by(uid(3)), 200.0);
        assert_eq!(m.owed_to(uid(1)), 175.0);
        assert_eq!(m.total(), 225.0);
    }
}
