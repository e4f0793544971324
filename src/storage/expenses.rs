//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json, with an index from
//! group to expense ids for the per-group views and cascade deletes.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SplitError;
use crate::models::{Expense, ExpenseId, GroupId};

use super::file_io::{read_json_or_default, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence with a by-group index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<ExpenseId, Expense>>,
    /// Index: group_id -> expense_ids
    by_group: RwLock<HashMap<GroupId, Vec<ExpenseId>>>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
            by_group: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and build the group index
    pub fn load(&self) -> Result<(), SplitError> {
        let file_data: ExpenseData = read_json_or_default(&self.path);

        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_group = self.by_group.write().map_err(lock_error)?;

        data.clear();
        by_group.clear();

        for expense in file_data.expenses {
            by_group.entry(expense.group_id).or_default().push(expense.id);
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), SplitError> {
        let data = self.data.read().map_err(lock_error)?;

        let file_data = ExpenseData {
            expenses: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all expenses in the order they were recorded
    pub fn get_all(&self) -> Result<Vec<Expense>, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.values().cloned().collect())
    }

    /// Get a group's expenses in the order they were recorded
    pub fn get_by_group(&self, group_id: GroupId) -> Result<Vec<Expense>, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        let by_group = self.by_group.read().map_err(lock_error)?;

        let ids = by_group.get(&group_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut expenses: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        expenses.sort_by_key(|e| e.id);
        Ok(expenses)
    }

    pub fn insert(&self, expense: Expense) -> Result<(), SplitError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_group = self.by_group.write().map_err(lock_error)?;

        if let Some(previous) = data.get(&expense.id) {
            if let Some(ids) = by_group.get_mut(&previous.group_id) {
                ids.retain(|id| *id != expense.id);
            }
        }

        by_group.entry(expense.group_id).or_default().push(expense.id);
        data.insert(expense.id, expense);
        Ok(())
    }

    /// Remove an expense, returning it if it existed
    pub fn delete(&self, id: ExpenseId) -> Result<Option<Expense>, SplitError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_group = self.by_group.write().map_err(lock_error)?;

        let removed = data.remove(&id);
        if let Some(expense) = &removed {
            if let Some(ids) = by_group.get_mut(&expense.group_id) {
                ids.retain(|e| *e != id);
            }
        }
        Ok(removed)
    }

    /// Remove every expense of a group, returning what was removed
    pub fn delete_by_group(&self, group_id: GroupId) -> Result<Vec<Expense>, SplitError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_group = self.by_group.write().map_err(lock_error)?;

        let ids = by_group.remove(&group_id).unwrap_or_default();
        Ok(ids.into_iter().filter_map(|id| data.remove(&id)).collect())
    }

    /// Drop every expense held in memory
    pub fn clear(&self) -> Result<(), SplitError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_group = self.by_group.write().map_err(lock_error)?;
        data.clear();
        by_group.clear();
        Ok(())
    }

    pub fn max_id(&self) -> Result<Option<u64>, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.keys().next_back().map(ExpenseId::value))
    }

    pub fn count(&self) -> Result<usize, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
