//! YAML Export functionality
//!
//! Exports the complete ledger to YAML format for human-readable backup.

use std::io::Write;

use crate::error::{SplitError, SplitResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full ledger to YAML format
pub fn export_full_yaml<W: Write + ?Sized>(storage: &Storage, writer: &mut W) -> SplitResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# SplitSmart Full Ledger Export")
        .map_err(|e| SplitError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| SplitError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| SplitError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| SplitError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| SplitError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SplitPaths;
    use crate::models::{Currency, Group, GroupId, Settlement, SettlementId, User, UserId, Money};
    use tempfile::TempDir;

    #[test]
    fn test_yaml_export() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        storage
            .users
            .upsert(User::new(UserId::new(1), "Asha", "asha@gmail.com"))
            .unwrap();
        storage
            .groups
            .upsert(Group::new(GroupId::new(101), "Goa Trip", UserId::new(1), vec![], Currency::Inr))
            .unwrap();
        storage
            .settlements
            .append(Settlement::new(
                SettlementId::new(1),
                UserId::new(2),
                UserId::new(1),
                Money::from_cents(2_500),
                "Cash",
                UserId::new(2),
            ))
            .unwrap();

        let mut output = Vec::new();
        export_full_yaml(&storage, &mut output).unwrap();

        let yaml = String::from_utf8(output).unwrap();
        assert!(yaml.starts_with("# SplitSmart Full Ledger Export"));
        assert!(yaml.contains("schema_version: 1.0.0"));
        assert!(yaml.contains("Goa Trip"));
        assert!(yaml.contains("method: Cash"));
    }
}
