//! Export module for SplitSmart
//!
//! Provides complete data export functionality in multiple formats:
//! - CSV: For expenses, settlements and the transfer plan (spreadsheet-compatible)
//! - JSON: For machine-readable full ledger export
//! - YAML: For human-readable full ledger export

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_expenses_csv, export_settlements_csv, export_transfers_csv};
pub use self::json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_full_yaml;
