//! CLI commands for data export
//!
//! Provides commands for exporting the ledger in various formats.

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::error::SplitResult;
use crate::export::{csv, json, yaml};
use crate::services::BalanceService;

use super::{with_output, CommandContext};

/// What a CSV export contains
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CsvTable {
    Expenses,
    Settlements,
    /// The current simplified settlement plan
    Transfers,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the full ledger as JSON
    Json {
        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export the full ledger as YAML
    Yaml {
        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export one table as CSV
    Csv {
        #[arg(value_enum)]
        table: CsvTable,
        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(ctx: &CommandContext<'_>, cmd: ExportCommands) -> SplitResult<()> {
    let storage = ctx.storage;

    let output = match cmd {
        ExportCommands::Json { output } => {
            with_output(output.as_deref(), |w| json::export_full_json(storage, w))?;
            output
        }
        ExportCommands::Yaml { output } => {
            with_output(output.as_deref(), |w| yaml::export_full_yaml(storage, w))?;
            output
        }
        ExportCommands::Csv { table, output } => {
            match table {
                CsvTable::Expenses => {
                    with_output(output.as_deref(), |w| csv::export_expenses_csv(storage, w))?
                }
                CsvTable::Settlements => with_output(output.as_deref(), |w| {
                    csv::export_settlements_csv(storage, w)
                })?,
                CsvTable::Transfers => {
                    let plan = BalanceService::new(storage, ctx.settings.conversion_rate).plan()?;
                    with_output(output.as_deref(), |w| {
                        csv::export_transfers_csv(storage, &plan, w)
                    })?
                }
            }
            output
        }
    };

    if let Some(path) = output {
        tracing::info!(path = %path.display(), "exported ledger data");
        println!("Exported to: {}", path.display());
    }

    Ok(())
}
