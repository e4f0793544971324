//! Report CLI commands
//!
//! Spending analytics over every recorded expense.

use std::path::PathBuf;

use clap::Subcommand;

use crate::display::{format_group_spending, format_top_spenders};
use crate::error::SplitResult;
use crate::reports::{
    CategoryReport, GroupSpendingReport, SpendingTrend, TopSpenders, DEFAULT_TREND_DAYS,
    MAX_TREND_DAYS,
};

use super::{with_output, CommandContext};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Spending by category
    Categories {
        /// Write the report as CSV to this file instead
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Daily amounts the acting user paid over recent days
    Trend {
        /// Number of days to show, ending today
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_TREND_DAYS,
            value_parser = clap::value_parser!(u32).range(1..=MAX_TREND_DAYS as i64)
        )]
        days: u32,
    },
    /// The biggest payers
    Spenders,
    /// Running totals per group
    Groups {
        /// Include groups the acting user is not in
        #[arg(short, long)]
        all: bool,
    },
}

/// Handle a report command
pub fn handle_report_command(ctx: &CommandContext<'_>, cmd: ReportCommands) -> SplitResult<()> {
    let rate = ctx.settings.conversion_rate;

    match cmd {
        ReportCommands::Categories { csv } => {
            let report = CategoryReport::generate(ctx.storage, rate)?;
            match csv {
                Some(path) => {
                    with_output(Some(path.as_path()), |w| report.export_csv(w))?;
                    println!("Category report exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal()),
            }
        }

        ReportCommands::Trend { days } => {
            let today = chrono::Local::now().date_naive();
            let trend = SpendingTrend::generate(ctx.storage, ctx.actor()?, today, days, rate)?;
            print!("{}", trend.format_terminal());
        }

        ReportCommands::Spenders => {
            let report = TopSpenders::generate(ctx.storage, rate)?;
            print!("{}", format_top_spenders(&report));
        }

        ReportCommands::Groups { all } => {
            let member = if all { None } else { Some(ctx.actor()?) };
            let report = GroupSpendingReport::generate(ctx.storage, member)?;
            print!("{}", format_group_spending(&report));
        }
    }

    Ok(())
}
