//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod balance;
pub mod expense;
pub mod export;
pub mod group;
pub mod report;
pub mod settle;
pub mod user;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::config::settings::Settings;
use crate::display::Names;
use crate::error::{SplitError, SplitResult};
use crate::mirror::MirrorSink;
use crate::models::{Currency, Money, UserId};
use crate::services::UserService;
use crate::storage::Storage;

pub use balance::{handle_balance_command, BalanceCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use group::{handle_group_command, GroupCommands};
pub use report::{handle_report_command, ReportCommands};
pub use settle::{handle_settle_command, SettleCommands};
pub use user::{handle_user_command, UserCommands};

/// What a command runs against besides its own arguments
pub struct CommandContext<'a> {
    pub storage: &'a Storage,
    pub settings: &'a Settings,
    pub mirror: &'a dyn MirrorSink,
    /// The user from `--as`, or the logged-in user
    pub actor: Option<UserId>,
}

impl CommandContext<'_> {
    /// The acting user; commands that act on someone's behalf need one
    pub fn actor(&self) -> SplitResult<UserId> {
        self.actor.ok_or(SplitError::NoCurrentUser)
    }

    pub fn names(&self) -> SplitResult<Names> {
        Ok(Names::from_users(&self.storage.users.get_all()?))
    }
}

/// Pick the acting user: `--as` wins over the saved login. A saved login
/// whose user no longer exists is ignored.
pub fn resolve_actor(
    storage: &Storage,
    settings: &Settings,
    as_user: Option<&str>,
) -> SplitResult<Option<UserId>> {
    if let Some(identifier) = as_user {
        return Ok(Some(UserService::new(storage).resolve(identifier)?.id));
    }

    match settings.current_user {
        Some(id) if storage.users.exists(id)? => Ok(Some(id)),
        Some(id) => {
            tracing::warn!(user = %id, "saved login refers to a missing user");
            Ok(None)
        }
        None => Ok(None),
    }
}

pub(crate) fn parse_money(input: &str) -> SplitResult<Money> {
    Money::parse(input).map_err(|e| {
        SplitError::Validation(format!(
            "Invalid amount: '{}'. Use format like '250.50' or '250'. Error: {}",
            input, e
        ))
    })
}

pub(crate) fn parse_currency(input: &str) -> SplitResult<Currency> {
    Currency::parse(input).ok_or_else(|| {
        SplitError::Validation(format!("Invalid currency: '{}'. Valid: INR, USD", input))
    })
}

/// Parse a YYYY-MM-DD date, defaulting to today
pub(crate) fn parse_date(input: Option<&str>) -> SplitResult<NaiveDate> {
    match input {
        Some(s) => parse_date_str(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub(crate) fn parse_date_str(input: &str) -> SplitResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        SplitError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", input))
    })
}

/// Parse `who=amount` pairs, resolving each `who` to a user
pub(crate) fn parse_user_amounts(
    storage: &Storage,
    pairs: &[String],
) -> SplitResult<Option<BTreeMap<UserId, Money>>> {
    if pairs.is_empty() {
        return Ok(None);
    }

    let users = UserService::new(storage);
    let mut map = BTreeMap::new();
    for pair in pairs {
        let (who, amount) = pair.rsplit_once('=').ok_or_else(|| {
            SplitError::Validation(format!("Expected NAME=AMOUNT, got '{}'", pair))
        })?;
        let user = users.resolve(who.trim())?;
        *map.entry(user.id).or_insert_with(Money::zero) += parse_money(amount)?;
    }
    Ok(Some(map))
}

/// Write to `path`, or to stdout when no path is given
pub(crate) fn with_output<F>(path: Option<&Path>, f: F) -> SplitResult<()>
where
    F: FnOnce(&mut dyn Write) -> SplitResult<()>,
{
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                SplitError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            f(&mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            f(&mut lock)?;
            lock.flush()?;
        }
    }
    Ok(())
}
