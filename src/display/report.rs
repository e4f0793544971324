//! Report formatting utilities for terminal output

use crate::reports::{GroupSpendingReport, TopSpenders};

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Format the top spenders as a ranked list
pub fn format_top_spenders(report: &TopSpenders) -> String {
    if report.spenders.is_empty() {
        return "No spending recorded yet.\n".to_string();
    }

    let mut output = String::new();
    output.push_str("Top Spenders\n");
    output.push_str(&separator(36));
    output.push('\n');

    for (rank, spender) in report.spenders.iter().enumerate() {
        output.push_str(&format!(
            "{}. {:<20} {:>12.0}\n",
            rank + 1,
            truncate(&spender.name, 20),
            spender.amount
        ));
    }

    output
}

/// Format the per-group running totals
pub fn format_group_spending(report: &GroupSpendingReport) -> String {
    if report.groups.is_empty() {
        return "No groups found.\n".to_string();
    }

    let name_width = report
        .groups
        .iter()
        .map(|g| g.name.chars().count())
        .max()
        .unwrap_or(5)
        .clamp(5, 30);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:<name_width$}  {:>14}  {:>8}\n",
        "ID",
        "Group",
        "Total",
        "Expenses",
        name_width = name_width,
    ));
    output.push_str(&separator(name_width + 35));
    output.push('\n');

    for row in &report.groups {
        output.push_str(&format!(
            "{:>5}  {:<name_width$}  {:>14}  {:>8}\n",
            row.group.to_string(),
            truncate(&row.name, name_width),
            row.total.format_with_symbol(row.currency.symbol()),
            row.expense_count,
            name_width = name_width,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;
    use crate::reports::Spender;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Dinner", 10), "Dinner");
        assert_eq!(truncate("Dinner at the beach shack", 10), "Dinner ...");
        assert_eq!(truncate("Chai ☕ run", 7), "Chai...");
    }

    #[test]
    fn test_top_spenders_ranked() {
        let report = TopSpenders {
            spenders: vec![
                Spender {
                    user: UserId::new(1),
                    name: "Asha".into(),
                    amount: 900.0,
                },
                Spender {
                    user: UserId::new(2),
                    name: "Ravi".into(),
                    amount: 120.0,
                },
            ],
        };

        let output = format_top_spenders(&report);
        assert!(output.contains("1. Asha"));
        assert!(output.contains("2. Ravi"));
        assert!(output.contains("900"));
    }
}
