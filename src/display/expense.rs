//! Expense display formatting
//!
//! Register-style list of expenses plus a detail view with each person's
//! share of the bill.

use crate::models::Expense;

use super::report::truncate;
use super::Names;

/// Format one expense as a register row
pub fn format_expense_row(expense: &Expense, names: &Names) -> String {
    let paid_by = if expense.is_multi_payer() {
        format!("{} +{}", names.get(expense.payer_ids[0]), expense.payer_ids.len() - 1)
    } else {
        expense
            .payer_ids
            .first()
            .map(|id| names.get(*id).to_string())
            .unwrap_or_default()
    };
    let split_indicator = if expense.custom_split_shares.is_some() {
        " *"
    } else {
        ""
    };

    format!(
        "{:>4}  {}  {:<24}  {:>12}  {:<14}  {}{}",
        expense.id.to_string(),
        expense.date.format("%Y-%m-%d"),
        truncate(&expense.description, 24),
        expense.amount.format_with_symbol(expense.currency.symbol()),
        truncate(&paid_by, 14),
        expense.participants.len(),
        split_indicator
    )
}

/// Format a list of expenses as a register
pub fn format_expense_list(expenses: &[Expense], names: &Names) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:10}  {:<24}  {:>12}  {:<14}  {}\n",
        "ID", "Date", "Description", "Amount", "Paid By", "Split"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, names));
        output.push('\n');
    }

    if expenses.iter().any(|e| e.custom_split_shares.is_some()) {
        output.push_str("\n* custom split\n");
    }

    output
}

/// Format a single expense with who paid and who owes what
pub fn format_expense_details(expense: &Expense, names: &Names) -> String {
    let symbol = expense.currency.symbol();
    let mut output = String::new();

    output.push_str(&format!("Expense #{}: {}\n", expense.id, expense.description));
    output.push_str(&format!("  Date:     {}\n", expense.date));
    output.push_str(&format!(
        "  Amount:   {}\n",
        expense.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("  Group:    {}\n", expense.group_id));

    output.push_str("  Paid by:\n");
    match &expense.custom_payer_contributions {
        Some(contributions) => {
            for (id, paid) in contributions {
                output.push_str(&format!(
                    "    {:<16} {:>12}\n",
                    names.get(*id),
                    paid.format_with_symbol(symbol)
                ));
            }
        }
        None => {
            output.push_str(&format!("    {}\n", names.join(&expense.payer_ids)));
        }
    }

    output.push_str("  Split between:\n");
    match &expense.custom_split_shares {
        Some(shares) => {
            for id in &expense.participants {
                let share = shares.get(id).copied().unwrap_or_default();
                output.push_str(&format!(
                    "    {:<16} {:>12}\n",
                    names.get(*id),
                    share.format_with_symbol(symbol)
                ));
            }
        }
        None => {
            let share = expense.amount.to_major() / expense.participants.len().max(1) as f64;
            for id in &expense.participants {
                output.push_str(&format!(
                    "    {:<16} {:>12}\n",
                    names.get(*id),
                    format!("{}{:.2}", symbol, share)
                ));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, GroupId, Money, User, UserId};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn names() -> Names {
        Names::from_users(&[
            User::new(UserId::new(1), "Asha", "asha@gmail.com"),
            User::new(UserId::new(2), "Ravi", "ravi@yahoo.in"),
            User::new(UserId::new(3), "Meera", "meera@outlook.com"),
        ])
    }

    fn dinner() -> Expense {
        Expense::new(
            ExpenseId::new(7),
            GroupId::new(101),
            "Dinner",
            Money::from_cents(10_000),
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            vec![UserId::new(1)],
            vec![UserId::new(1), UserId::new(2), UserId::new(3)],
        )
    }

    #[test]
    fn test_equal_split_details() {
        let output = format_expense_details(&dinner(), &names());
        assert!(output.starts_with("Expense #7: Dinner"));
        assert!(output.contains("₹100.00"));
        assert!(output.contains("₹33.33"));
    }

    #[test]
    fn test_custom_split_marked_in_list() {
        let expense = dinner().with_split_shares(BTreeMap::from([
            (UserId::new(1), Money::from_cents(2_000)),
            (UserId::new(2), Money::from_cents(3_000)),
            (UserId::new(3), Money::from_cents(5_000)),
        ]));

        let output = format_expense_list(&[expense.clone()], &names());
        assert!(output.contains("* custom split"));
        assert!(output.contains("Asha"));

        let details = format_expense_details(&expense, &names());
        assert!(details.contains("₹50.00"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_expense_list(&[], &names()), "No expenses found.\n");
    }
}
