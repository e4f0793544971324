//! Spending by category
//!
//! Expenses carry no category field; each one is bucketed by the first
//! keyword found in its description.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use serde::Serialize;

use crate::error::{SplitError, SplitResult};
use crate::models::Expense;
use crate::storage::Storage;

/// Keyword-derived expense category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Food,
    Accommodation,
    Transport,
    Shopping,
    Entertainment,
    Other,
}

/// Checked in order; the first category with a matching keyword wins
const KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &["dinner", "lunch", "breakfast", "restaurant", "groceries", "cafe", "food", "meal"],
    ),
    (
        Category::Accommodation,
        &["hotel", "stay", "rent", "airbnb", "lodging", "house"],
    ),
    (
        Category::Transport,
        &["taxi", "uber", "bus", "flight", "train", "gas", "car", "fuel"],
    ),
    (
        Category::Shopping,
        &["shopping", "clothes", "gifts", "souvenirs", "retail"],
    ),
    (
        Category::Entertainment,
        &["cinema", "tickets", "museum", "activity", "show"],
    ),
];

impl Category {
    /// Categorize a description by substring match
    pub fn classify(description: &str) -> Self {
        let description = description.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| description.contains(w)))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Food => "Food",
            Self::Accommodation => "Accommodation",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        };
        write!(f, "{}", name)
    }
}

/// One category row
#[derive(Debug, Clone, Serialize)]
pub struct CategorySpending {
    pub category: Category,
    /// Total in the common unit
    pub amount: f64,
    pub expense_count: usize,
    pub percentage: f64,
}

/// Spending across all expenses, grouped by category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    /// Largest first
    pub categories: Vec<CategorySpending>,
    pub total: f64,
}

impl CategoryReport {
    pub fn generate(storage: &Storage, rate: f64) -> SplitResult<Self> {
        Ok(Self::from_expenses(&storage.expenses.get_all()?, rate))
    }

    pub fn from_expenses(expenses: &[Expense], rate: f64) -> Self {
        let mut totals: BTreeMap<Category, (f64, usize)> = BTreeMap::new();
        for expense in expenses {
            let amount = expense.currency.normalize(expense.amount.to_major(), rate);
            let entry = totals
                .entry(Category::classify(&expense.description))
                .or_insert((0.0, 0));
            entry.0 += amount;
            entry.1 += 1;
        }

        let total: f64 = totals.values().map(|(amount, _)| amount).sum();
        let mut categories: Vec<CategorySpending> = totals
            .into_iter()
            .map(|(category, (amount, expense_count))| CategorySpending {
                category,
                amount,
                expense_count,
                percentage: if total > 0.0 { amount / total * 100.0 } else { 0.0 },
            })
            .collect();
        categories.sort_by(|a, b| b.amount.total_cmp(&a.amount));

        Self { categories, total }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Spending by Category\n");
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>12} {:>7} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(50));
        output.push('\n');

        for row in &self.categories {
            output.push_str(&format!(
                "{:<20} {:>12.2} {:>7} {:>7.1}%\n",
                row.category.to_string(),
                row.amount,
                row.expense_count,
                row.percentage
            ));
        }

        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>12.2}\n", "TOTAL", self.total));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> SplitResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(["Category", "Amount", "Count", "Percentage"])
            .map_err(|e| SplitError::Export(e.to_string()))?;

        for row in &self.categories {
            csv_writer
                .write_record([
                    row.category.to_string(),
                    format!("{:.2}", row.amount),
                    row.expense_count.to_string(),
                    format!("{:.2}", row.percentage),
                ])
                .map_err(|e| SplitError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| SplitError::Export(e.to_string()))?;
        Ok(())
    }
}
