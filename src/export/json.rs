//! JSON Export functionality
//!
//! Exports the complete ledger to JSON format with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SplitError, SplitResult};
use crate::models::{Expense, Group, Settlement, User};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub users: Vec<User>,

    pub groups: Vec<Group>,

    pub expenses: Vec<Expense>,

    /// In record order
    pub settlements: Vec<Settlement>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub user_count: usize,
    pub group_count: usize,
    pub expense_count: usize,
    pub settlement_count: usize,

    /// Date range of expenses (earliest)
    pub earliest_expense: Option<String>,

    /// Date range of expenses (latest)
    pub latest_expense: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> SplitResult<Self> {
        let users = storage.users.get_all()?;
        let groups = storage.groups.get_all()?;
        let expenses = storage.expenses.get_all()?;
        let settlements = storage.settlements.get_all()?;

        let metadata = ExportMetadata {
            user_count: users.len(),
            group_count: groups.len(),
            expense_count: expenses.len(),
            settlement_count: settlements.len(),
            earliest_expense: expenses.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest_expense: expenses.iter().map(|e| e.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            users,
            groups,
            expenses,
            settlements,
            metadata,
        })
    }
}

/// Export the full ledger to JSON
pub fn export_full_json<W: Write + ?Sized>(storage: &Storage, writer: &mut W) -> SplitResult<()> {
    let export = FullExport::from_storage(storage)?;

    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| SplitError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| SplitError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SplitPaths;
    use crate::models::{ExpenseId, GroupId, Money, UserId};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_json_export() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .users
            .upsert(User::new(UserId::new(1), "Asha", "asha@gmail.com"))
            .unwrap();
        storage
            .expenses
            .insert(Expense::new(
                ExpenseId::new(1),
                GroupId::new(101),
                "Dinner",
                Money::from_cents(4_500),
                NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
                vec![UserId::new(1)],
                vec![UserId::new(1)],
            ))
            .unwrap();

        let mut output = Vec::new();
        export_full_json(&storage, &mut output).unwrap();

        let parsed: FullExport = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed.metadata.user_count, 1);
        assert_eq!(parsed.metadata.earliest_expense.as_deref(), Some("2025-02-14"));
        assert_eq!(parsed.expenses[0].amount, Money::from_cents(4_500));
    }
}
