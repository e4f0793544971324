//! Settlement CLI commands
//!
//! Paying someone back and viewing the payment history.

use clap::{Subcommand, ValueEnum};

use crate::display::format_settlement_history;
use crate::error::{SplitError, SplitResult};
use crate::services::{describe_method, BalanceService, SettlementService, UserService};

use super::{parse_money, CommandContext};

/// How a payment was made
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PaymentChannel {
    Cash,
    Upi,
    Bank,
    Other,
}

impl PaymentChannel {
    fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Upi => "UPI ID",
            Self::Bank => "Bank Transfer",
            Self::Other => "Other",
        }
    }
}

/// Settlement subcommands
#[derive(Subcommand)]
pub enum SettleCommands {
    /// Record a payment from the acting user
    Pay {
        /// Who was paid (email, name or ID)
        to: String,
        /// Amount paid (defaults to what the settlement plan says you owe them)
        #[arg(short, long)]
        amount: Option<String>,
        /// Payment channel
        #[arg(short, long, value_enum, default_value = "other")]
        method: PaymentChannel,
        /// Reference for the channel, e.g. the UPI ID paid to
        #[arg(long)]
        detail: Option<String>,
    },
    /// Show payment history
    History {
        /// Show every payment, not only the acting user's
        #[arg(short, long)]
        all: bool,
    },
}

/// Handle a settle command
pub fn handle_settle_command(ctx: &CommandContext<'_>, cmd: SettleCommands) -> SplitResult<()> {
    let service = SettlementService::new(ctx.storage, ctx.mirror);

    match cmd {
        SettleCommands::Pay {
            to,
            amount,
            method,
            detail,
        } => {
            let payer = ctx.actor()?;
            let recipient = UserService::new(ctx.storage).resolve(&to)?;

            let amount = match amount {
                Some(a) => parse_money(&a)?,
                None => BalanceService::new(ctx.storage, ctx.settings.conversion_rate)
                    .planned_amount(payer, recipient.id)?
                    .ok_or_else(|| {
                        SplitError::Validation(format!(
                            "The settlement plan has nothing for you to pay {}. Pass --amount to record a payment anyway",
                            recipient.name
                        ))
                    })?,
            };

            let method = describe_method(method.label(), detail.as_deref());
            let settlement = service.record(payer, recipient.id, amount, &method, payer)?;

            println!(
                "Recorded payment of {} to {} ({})",
                settlement
                    .amount
                    .format_with_symbol(settlement.currency.symbol()),
                recipient.name,
                settlement.method
            );
        }

        SettleCommands::History { all } => {
            let user = if all { None } else { Some(ctx.actor()?) };
            let history = service.history(user)?;
            print!("{}", format_settlement_history(&history, &ctx.names()?));
        }
    }

    Ok(())
}
