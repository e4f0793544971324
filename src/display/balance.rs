//! Balance display formatting
//!
//! The dashboard summary and the simplified transfer plan. All amounts are in
//! the common unit.

use crate::ledger::{BalanceSummary, PendingTransfers, Transfer};
use crate::models::{Currency, User};

use super::report::separator;
use super::Names;

fn amount(value: f64) -> String {
    format!("{}{:.2}", Currency::COMMON.symbol(), value)
}

/// Format a user's dashboard figures
pub fn format_summary(summary: &BalanceSummary, names: &Names) -> String {
    let mut output = String::new();

    output.push_str(&format!("Balance for {}\n", names.get(summary.user)));
    output.push_str(&separator(36));
    output.push('\n');
    output.push_str(&format!(
        "  Total expenses:  {:>14}\n",
        format!("{}{:.0}", Currency::COMMON.symbol(), summary.total_expenses)
    ));
    output.push_str(&format!("  You are owed:    {:>14}\n", amount(summary.lent)));
    output.push_str(&format!("  You owe:         {:>14}\n", amount(summary.owe)));

    if summary.is_settled() {
        output.push_str("\n  All settled up.\n");
    }

    output
}

/// Format the full simplified plan
pub fn format_transfer_plan(transfers: &[Transfer], names: &Names) -> String {
    if transfers.is_empty() {
        return "Everyone is settled up.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("Settlement plan ({} payments)\n", transfers.len()));
    output.push_str(&separator(50));
    output.push('\n');

    for t in transfers {
        output.push_str(&format!(
            "  {:<16} pays {:<16} {:>12}\n",
            names.get(t.payer),
            names.get(t.recipient),
            amount(t.amount)
        ));
    }

    output
}

/// Format what the acting user has to pay and receive, with the payment
/// details of everyone they owe
pub fn format_pending(pending: &PendingTransfers, names: &Names, users: &[User]) -> String {
    if pending.to_pay.is_empty() && pending.to_receive.is_empty() {
        return "Nothing pending.\n".to_string();
    }

    let mut output = String::new();

    if !pending.to_pay.is_empty() {
        output.push_str("You pay:\n");
        for t in &pending.to_pay {
            output.push_str(&format!(
                "  {:<16} {:>12}\n",
                names.get(t.recipient),
                amount(t.amount)
            ));
            let details = users
                .iter()
                .find(|u| u.id == t.recipient)
                .and_then(User::payment_details);
            if let Some(details) = details {
                output.push_str(&format!("    {}\n", details));
            }
        }
    }

    if !pending.to_receive.is_empty() {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str("You receive:\n");
        for t in &pending.to_receive {
            output.push_str(&format!(
                "  {:<16} {:>12}\n",
                names.get(t.payer),
                amount(t.amount)
            ));
        }
    }

    output
}
