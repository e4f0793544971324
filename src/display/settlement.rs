//! Settlement display formatting

use crate::models::Settlement;

use super::report::truncate;
use super::Names;

/// Format the payment history
pub fn format_settlement_history(settlements: &[Settlement], names: &Names) -> String {
    if settlements.is_empty() {
        return "No payments recorded.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:16}  {:<14}  {:<14}  {:>12}  {}\n",
        "ID", "When", "From", "To", "Amount", "Method"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for s in settlements {
        output.push_str(&format!(
            "{:>4}  {:16}  {:<14}  {:<14}  {:>12}  {}\n",
            s.id.to_string(),
            s.settled_at.format("%Y-%m-%d %H:%M").to_string(),
            truncate(names.get(s.from), 14),
            truncate(names.get(s.to), 14),
            s.amount.format_with_symbol(s.currency.symbol()),
            s.method
        ));
    }

    output
}
