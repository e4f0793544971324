//! Expense service
//!
//! Recording and removing expenses. Every check runs before anything is
//! written, so a rejected expense leaves no trace.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{SplitError, SplitResult};
use crate::mirror::{MirrorEvent, MirrorSink};
use crate::models::{Currency, Expense, ExpenseId, GroupId, Money, UserId};
use crate::storage::Storage;

use super::user::UserService;

/// Input for recording an expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub group_id: GroupId,
    pub description: String,
    pub amount: Money,
    /// Defaults to the group's currency
    pub currency: Option<Currency>,
    pub date: NaiveDate,
    pub payers: Vec<UserId>,
    pub participants: Vec<UserId>,
    pub split_shares: Option<BTreeMap<UserId, Money>>,
    /// Only used when more than one payer is given
    pub payer_contributions: Option<BTreeMap<UserId, Money>>,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    mirror: &'a dyn MirrorSink,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage, mirror: &'a dyn MirrorSink) -> Self {
        Self { storage, mirror }
    }

    /// Validate and record an expense
    pub fn add(&self, input: NewExpense) -> SplitResult<Expense> {
        let group = self
            .storage
            .groups
            .get(input.group_id)?
            .ok_or_else(|| SplitError::group_not_found(input.group_id.to_string()))?;

        let payers = dedup(input.payers);
        let participants = dedup(input.participants);

        for id in payers.iter().chain(participants.iter()) {
            if !group.is_member(*id) {
                return Err(SplitError::Validation(format!(
                    "User {} is not a member of {}",
                    id, group.name
                )));
            }
        }

        let mut expense = Expense::new(
            ExpenseId::new(0),
            group.id,
            input.description.trim(),
            input.amount,
            input.date,
            payers,
            participants,
        )
        .with_currency(input.currency.unwrap_or(group.currency));

        if let Some(shares) = input.split_shares {
            expense = expense.with_split_shares(shares);
        }
        if expense.is_multi_payer() {
            if let Some(contributions) = input.payer_contributions {
                expense = expense.with_payer_contributions(contributions);
            }
        }

        expense
            .validate()
            .map_err(|e| SplitError::Validation(e.to_string()))?;

        expense.id = self.storage.next_expense_id()?;
        self.storage.expenses.insert(expense.clone())?;
        self.storage
            .groups
            .update(group.id, |g| g.record_expense(expense.amount))?;

        self.storage.expenses.save()?;
        self.storage.groups.save()?;
        self.storage.save_sequences()?;

        tracing::info!(
            expense = %expense.id,
            group = %group.id,
            amount = %expense.amount,
            currency = %expense.currency,
            "recorded expense"
        );

        self.mirror.record(self.mirror_event(&expense)?);
        Ok(expense)
    }

    fn mirror_event(&self, expense: &Expense) -> SplitResult<MirrorEvent> {
        let users = UserService::new(self.storage);

        let payer = match expense.payer_ids.first() {
            Some(id) => users.name_of(*id)?,
            None => "Unknown".to_string(),
        };
        let participants = expense
            .participants
            .iter()
            .map(|id| users.name_of(*id))
            .collect::<SplitResult<Vec<_>>>()?;

        Ok(MirrorEvent::ExpenseCreated {
            group_id: expense.group_id,
            payer,
            amount: expense.amount.to_major(),
            description: expense.description.clone(),
            participants,
        })
    }

    /// Remove an expense and take it off its group's running total
    pub fn delete(&self, id: ExpenseId) -> SplitResult<Expense> {
        let expense = self
            .storage
            .expenses
            .delete(id)?
            .ok_or_else(|| SplitError::expense_not_found(id.to_string()))?;

        self.storage
            .groups
            .update(expense.group_id, |g| g.remove_expense(expense.amount))?;

        self.storage.expenses.save()?;
        self.storage.groups.save()?;

        tracing::info!(expense = %id, group = %expense.group_id, "deleted expense");
        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> SplitResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Expenses newest first, optionally limited to one group
    pub fn list(&self, group: Option<GroupId>) -> SplitResult<Vec<Expense>> {
        let mut expenses = match group {
            Some(group_id) => self.storage.expenses.get_by_group(group_id)?,
            None => self.storage.expenses.get_all()?,
        };
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(expenses)
    }
}

fn dedup(ids: Vec<UserId>) -> Vec<UserId> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}
