//! CSV Export functionality
//!
//! Exports expenses, settlements and the current transfer plan to CSV. Users
//! are written by name.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{SplitError, SplitResult};
use crate::ledger::Transfer;
use crate::models::UserId;
use crate::storage::Storage;

fn export_error<E: std::fmt::Display>(e: E) -> SplitError {
    SplitError::Export(e.to_string())
}

fn user_names(storage: &Storage) -> SplitResult<HashMap<UserId, String>> {
    Ok(storage
        .users
        .get_all()?
        .into_iter()
        .map(|u| (u.id, u.name))
        .collect())
}

fn name(names: &HashMap<UserId, String>, id: &UserId) -> String {
    names
        .get(id)
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string())
}

fn join_names(names: &HashMap<UserId, String>, ids: &[UserId]) -> String {
    ids.iter()
        .map(|id| name(names, id))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Export all expenses to CSV
pub fn export_expenses_csv<W: Write>(storage: &Storage, writer: W) -> SplitResult<()> {
    let names = user_names(storage)?;
    let groups: HashMap<_, _> = storage
        .groups
        .get_all()?
        .into_iter()
        .map(|g| (g.id, g.name))
        .collect();

    let mut out = ::csv::Writer::from_writer(writer);
    out.write_record([
        "ID",
        "Date",
        "Group",
        "Description",
        "Amount",
        "Currency",
        "Paid By",
        "Participants",
        "Custom Split",
    ])
    .map_err(export_error)?;

    for expense in storage.expenses.get_all()? {
        out.write_record([
            expense.id.to_string(),
            expense.date.to_string(),
            groups
                .get(&expense.group_id)
                .cloned()
                .unwrap_or_else(|| "Unknown".to_string()),
            expense.description.clone(),
            format!("{:.2}", expense.amount.to_major()),
            expense.currency.code().to_string(),
            join_names(&names, &expense.payer_ids),
            join_names(&names, &expense.participants),
            expense.custom_split_shares.is_some().to_string(),
        ])
        .map_err(export_error)?;
    }

    out.flush().map_err(export_error)?;
    Ok(())
}

/// Export the settlement log to CSV, in record order
pub fn export_settlements_csv<W: Write>(storage: &Storage, writer: W) -> SplitResult<()> {
    let names = user_names(storage)?;

    let mut out = ::csv::Writer::from_writer(writer);
    out.write_record(["ID", "Settled At", "From", "To", "Amount", "Currency", "Method"])
        .map_err(export_error)?;

    for settlement in storage.settlements.get_all()? {
        out.write_record([
            settlement.id.to_string(),
            settlement.settled_at.to_rfc3339(),
            name(&names, &settlement.from),
            name(&names, &settlement.to),
            format!("{:.2}", settlement.amount.to_major()),
            settlement.currency.code().to_string(),
            settlement.method.clone(),
        ])
        .map_err(export_error)?;
    }

    out.flush().map_err(export_error)?;
    Ok(())
}

/// Export a transfer plan to CSV
pub fn export_transfers_csv<W: Write>(
    storage: &Storage,
    transfers: &[Transfer],
    writer: W,
) -> SplitResult<()> {
    let names = user_names(storage)?;

    let mut out = ::csv::Writer::from_writer(writer);
    out.write_record(["Payer", "Recipient", "Amount"])
        .map_err(export_error)?;

    for transfer in transfers {
        out.write_record([
            name(&names, &transfer.payer),
            name(&names, &transfer.recipient),
            format!("{:.2}", transfer.amount),
        ])
        .map_err(export_error)?;
    }

    out.flush().map_err(export_error)?;
    Ok(())
}
