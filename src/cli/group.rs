//! Group CLI commands
//!
//! Implements CLI commands for group management.

use clap::Subcommand;

use crate::display::{format_group_details, format_group_list};
use crate::error::{SplitError, SplitResult};
use crate::services::{CreateGroupInput, GroupService, GroupUpdate, MemberInput};

use super::{parse_currency, parse_date_str, CommandContext};

/// Group subcommands
#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create a group administered by the acting user
    Create {
        /// Group name
        name: String,
        /// Currency (INR, USD)
        #[arg(short, long, default_value = "INR")]
        currency: String,
        /// Member as "Name <email>" or an email; repeat for several
        #[arg(short, long = "member")]
        members: Vec<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },
    /// List groups
    List {
        /// Show every group, not only the acting user's
        #[arg(short, long)]
        all: bool,
    },
    /// Show group details and members
    Show {
        /// Group name or ID
        group: String,
    },
    /// Edit a group
    Edit {
        /// Group name or ID
        group: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        currency: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Replace the member list; repeat for several
        #[arg(short, long = "member")]
        members: Vec<String>,
    },
    /// Add members to a group
    AddMember {
        /// Group name or ID
        group: String,
        /// Members as "Name <email>" or an email
        #[arg(required = true)]
        members: Vec<String>,
    },
    /// Delete a group and all of its expenses
    Delete {
        /// Group name or ID
        group: String,
        /// Skip the confirmation notice
        #[arg(short, long)]
        yes: bool,
    },
}

fn parse_members(inputs: &[String]) -> SplitResult<Vec<MemberInput>> {
    inputs.iter().map(|m| MemberInput::parse(m)).collect()
}

/// Handle a group command
pub fn handle_group_command(ctx: &CommandContext<'_>, cmd: GroupCommands) -> SplitResult<()> {
    let service = GroupService::new(ctx.storage, ctx.mirror);

    match cmd {
        GroupCommands::Create {
            name,
            currency,
            members,
            start,
            end,
        } => {
            let input = CreateGroupInput {
                name,
                currency: parse_currency(&currency)?,
                members: parse_members(&members)?,
                start_date: start.as_deref().map(parse_date_str).transpose()?,
                end_date: end.as_deref().map(parse_date_str).transpose()?,
            };
            let group = service.create(ctx.actor()?, input)?;

            println!("Created group: {}", group.name);
            println!("  ID: {}", group.id);
            println!("  Currency: {}", group.currency);
            println!("  Members: {}", group.members.len());
        }

        GroupCommands::List { all } => {
            let member = if all { None } else { Some(ctx.actor()?) };
            let groups = service.list(member)?;
            print!("{}", format_group_list(&groups, &ctx.names()?));
        }

        GroupCommands::Show { group } => {
            let found = service.resolve(&group)?;
            print!("{}", format_group_details(&service.details(found)?));
        }

        GroupCommands::Edit {
            group,
            name,
            currency,
            start,
            end,
            members,
        } => {
            let found = service.resolve(&group)?;
            let update = GroupUpdate {
                name,
                currency: currency.as_deref().map(parse_currency).transpose()?,
                start_date: start.as_deref().map(parse_date_str).transpose()?,
                end_date: end.as_deref().map(parse_date_str).transpose()?,
                members: if members.is_empty() {
                    None
                } else {
                    Some(parse_members(&members)?)
                },
            };
            if update.name.is_none()
                && update.currency.is_none()
                && update.start_date.is_none()
                && update.end_date.is_none()
                && update.members.is_none()
            {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(found.id, update)?;
            println!("Updated group: {}", updated.name);
        }

        GroupCommands::AddMember { group, members } => {
            let found = service.resolve(&group)?;
            let updated = service.add_members(found.id, &parse_members(&members)?)?;
            println!(
                "{} now has {} members",
                updated.name,
                updated.members.len()
            );
        }

        GroupCommands::Delete { group, yes } => {
            let found = service.resolve(&group)?;
            if !yes {
                return Err(SplitError::Validation(format!(
                    "Deleting '{}' also removes its expenses. Re-run with --yes to confirm",
                    found.name
                )));
            }

            let (deleted, removed) = service.delete(found.id)?;
            println!(
                "Deleted group: {} ({} expenses removed)",
                deleted.name, removed
            );
        }
    }

    Ok(())
}
