//! Gross debt from expenses
//!
//! Turns every recorded expense into participant → payer debts, before any
//! settlement is taken into account.

use crate::models::{Expense, UserId};

use super::matrix::DebtMatrix;
use super::EPSILON;

/// Build the gross debt matrix from all expenses.
///
/// Amounts are normalized to the common unit with the fixed `rate`.
pub fn build_gross(expenses: &[Expense], rate: f64) -> DebtMatrix {
    let mut matrix = DebtMatrix::new();
    for expense in expenses {
        add_expense(&mut matrix, expense, rate);
    }
    matrix
}

fn add_expense(matrix: &mut DebtMatrix, expense: &Expense, rate: f64) {
    if expense.participants.is_empty() || expense.payer_ids.is_empty() {
        return;
    }

    let amount = expense.currency.normalize(expense.amount.to_major(), rate);
    let equal_share = amount / expense.participants.len() as f64;

    for &participant in &expense.participants {
        // Custom shares are taken as entered, without conversion
        let share = match &expense.custom_split_shares {
            Some(shares) => shares.get(&participant).map_or(0.0, |s| s.to_major()),
            None => equal_share,
        };

        if share < EPSILON {
            continue;
        }

        for &payer in &expense.payer_ids {
            if payer == participant {
                continue;
            }
            let debt = share * payer_fraction(expense, payer);
            if debt > 0.0 {
                matrix.add(participant, payer, debt);
            }
        }
    }
}

/// Fraction of the expense fronted by `payer`
fn payer_fraction(expense: &Expense, payer: UserId) -> f64 {
    if let Some(contributions) = &expense.custom_payer_contributions {
        let total: f64 = contributions.values().map(|c| c.to_major()).sum();
        if total > 0.0 {
            return contributions.get(&payer).map_or(0.0, |c| c.to_major()) / total;
        }
    }
    1.0 / expense.payer_ids.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, ExpenseId, GroupId, Money, DEFAULT_CONVERSION_RATE};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn uid(n: u64) -> UserId {
        UserId::new(n)
    }

    fn expense(amount_units: i64, payers: &[u64], participants: &[u64]) -> Expense {
        Expense::new(
            ExpenseId::new(1),
            GroupId::new(101),
            "Dinner",
            Money::from_cents(amount_units * 100),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            payers.iter().copied().map(UserId::new).collect(),
            participants.iter().copied().map(UserId::new).collect(),
        )
    }

    fn money_map(entries: &[(u64, i64)]) -> BTreeMap<UserId, Money> {
        entries
            .iter()
            .map(|(id, units)| (UserId::new(*id), Money::from_cents(units * 100)))
            .collect()
    }

    #[test]
    fn test_equal_split() {
        let m = build_gross(&[expense(300, &[1], &[1, 2, 3])], DEFAULT_CONVERSION_RATE);

        assert_eq!(m.get(uid(2), uid(1)), Some(100.0));
        assert_eq!(m.get(uid(3), uid(1)), Some(100.0));
        assert_eq!(m.get(uid(1), uid(1)), None);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn test_custom_split_with_multiple_payers() {
        // 1 and 2 take part with a zero share; 3 consumed it all
        let e = expense(200, &[1, 2], &[1, 2, 3])
            .with_payer_contributions(money_map(&[(1, 150), (2, 50)]))
            .with_split_shares(money_map(&[(1, 0), (2, 0), (3, 200)]));
        let m = build_gross(&[e], DEFAULT_CONVERSION_RATE);

        assert_eq!(m.get(uid(3), uid(1)), Some(150.0));
        assert_eq!(m.get(uid(3), uid(2)), Some(50.0));
        assert_eq!(m.row(uid(1)), None);
        assert_eq!(m.row(uid(2)), None);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn test_participant_missing_from_custom_shares_owes_nothing() {
        let e = expense(100, &[1], &[1, 2, 3]).with_split_shares(money_map(&[(1, 40), (2, 60)]));
        let m = build_gross(&[e], DEFAULT_CONVERSION_RATE);

        assert_eq!(m.get(uid(2), uid(1)), Some(60.0));
        assert_eq!(m.row(uid(3)), None);
    }

    #[test]
    fn test_equal_payers_without_contributions() {
        let m = build_gross(&[expense(90, &[1, 2], &[3])], DEFAULT_CONVERSION_RATE);

        assert_eq!(m.get(uid(3), uid(1)), Some(45.0));
        assert_eq!(m.get(uid(3), uid(2)), Some(45.0));
    }

    #[test]
    fn test_foreign_currency_is_normalized() {
        let e = expense(2, &[1], &[1, 2]).with_currency(Currency::Usd);
        let m = build_gross(&[e], DEFAULT_CONVERSION_RATE);

        assert_eq!(m.get(uid(2), uid(1)), Some(83.5));
    }

    #[test]
    fn test_no_participants_means_no_debt() {
        let m = build_gross(&[expense(50, &[1], &[])], DEFAULT_CONVERSION_RATE);
        assert!(m.is_empty());
    }

    #[test]
    fn test_payer_only_expense_has_no_self_debt() {
        let m = build_gross(&[expense(50, &[1], &[1])], DEFAULT_CONVERSION_RATE);
        assert!(m.is_empty());
    }
}
