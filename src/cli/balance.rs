//! Balance CLI commands

use clap::Subcommand;

use crate::display::{format_pending, format_summary, format_transfer_plan};
use crate::error::SplitResult;
use crate::services::BalanceService;

use super::CommandContext;

/// Balance subcommands
#[derive(Subcommand)]
pub enum BalanceCommands {
    /// Totals owed to and by the acting user
    Summary,
    /// The simplified settlement plan for everyone
    Plan,
    /// Planned payments the acting user makes or receives
    Pending,
}

/// Handle a balance command
pub fn handle_balance_command(ctx: &CommandContext<'_>, cmd: BalanceCommands) -> SplitResult<()> {
    let service = BalanceService::new(ctx.storage, ctx.settings.conversion_rate);
    let names = ctx.names()?;

    match cmd {
        BalanceCommands::Summary => {
            let summary = service.summary(ctx.actor()?)?;
            print!("{}", format_summary(&summary, &names));
        }

        BalanceCommands::Plan => {
            print!("{}", format_transfer_plan(&service.plan()?, &names));
        }

        BalanceCommands::Pending => {
            let pending = service.pending(ctx.actor()?)?;
            let users = ctx.storage.users.get_all()?;
            print!("{}", format_pending(&pending, &names, &users));
        }
    }

    Ok(())
}
