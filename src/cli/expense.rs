//! Expense CLI commands
//!
//! Implements CLI commands for recording and removing expenses.

use clap::Subcommand;

use crate::display::{format_expense_details, format_expense_list};
use crate::error::{SplitError, SplitResult};
use crate::models::{ExpenseId, UserId};
use crate::services::{ExpenseService, GroupService, NewExpense, UserService};

use super::{parse_currency, parse_date, parse_money, parse_user_amounts, CommandContext};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense in a group
    Add {
        /// Group name or ID
        group: String,
        /// What the money was spent on
        description: String,
        /// Amount (e.g., "1250.50")
        amount: String,
        /// Currency (defaults to the group's)
        #[arg(short, long)]
        currency: Option<String>,
        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Who paid; repeat for several (defaults to the acting user)
        #[arg(short = 'p', long = "paid-by")]
        paid_by: Vec<String>,
        /// Who shares the cost; repeat for several (defaults to every member)
        #[arg(short = 's', long = "split")]
        split: Vec<String>,
        /// Custom share as NAME=AMOUNT; repeat for every participant
        #[arg(long = "share")]
        shares: Vec<String>,
        /// Amount each payer paid as NAME=AMOUNT; required with several payers
        #[arg(long = "contribution")]
        contributions: Vec<String>,
    },
    /// List expenses, newest first
    List {
        /// Only expenses in this group
        #[arg(short, long)]
        group: Option<String>,
        /// Number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show one expense with its breakdown
    Show {
        /// Expense ID
        id: ExpenseId,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: ExpenseId,
    },
}

fn resolve_users(ctx: &CommandContext<'_>, identifiers: &[String]) -> SplitResult<Vec<UserId>> {
    let users = UserService::new(ctx.storage);
    identifiers
        .iter()
        .map(|i| users.resolve(i).map(|u| u.id))
        .collect()
}

/// Handle an expense command
pub fn handle_expense_command(ctx: &CommandContext<'_>, cmd: ExpenseCommands) -> SplitResult<()> {
    let service = ExpenseService::new(ctx.storage, ctx.mirror);

    match cmd {
        ExpenseCommands::Add {
            group,
            description,
            amount,
            currency,
            date,
            paid_by,
            split,
            shares,
            contributions,
        } => {
            let group = GroupService::new(ctx.storage, ctx.mirror).resolve(&group)?;

            let payers = if paid_by.is_empty() {
                vec![ctx.actor()?]
            } else {
                resolve_users(ctx, &paid_by)?
            };
            let participants = if split.is_empty() {
                group.effective_members()
            } else {
                resolve_users(ctx, &split)?
            };

            let input = NewExpense {
                group_id: group.id,
                description,
                amount: parse_money(&amount)?,
                currency: currency.as_deref().map(parse_currency).transpose()?,
                date: parse_date(date.as_deref())?,
                payers,
                participants,
                split_shares: parse_user_amounts(ctx.storage, &shares)?,
                payer_contributions: parse_user_amounts(ctx.storage, &contributions)?,
            };

            let expense = service.add(input)?;
            println!("Recorded expense #{}: {}", expense.id, expense);
        }

        ExpenseCommands::List { group, limit } => {
            let group_id = match group {
                Some(g) => Some(GroupService::new(ctx.storage, ctx.mirror).resolve(&g)?.id),
                None => None,
            };
            let mut expenses = service.list(group_id)?;
            expenses.truncate(limit);
            print!("{}", format_expense_list(&expenses, &ctx.names()?));
        }

        ExpenseCommands::Show { id } => {
            let expense = service
                .get(id)?
                .ok_or_else(|| SplitError::expense_not_found(id.to_string()))?;
            print!("{}", format_expense_details(&expense, &ctx.names()?));
        }

        ExpenseCommands::Delete { id } => {
            let deleted = service.delete(id)?;
            println!("Deleted expense #{}: {}", deleted.id, deleted.description);
        }
    }

    Ok(())
}
