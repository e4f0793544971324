//! Group repository for JSON storage
//!
//! Manages loading and saving groups to groups.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SplitError;
use crate::models::{Group, GroupId, UserId};

use super::file_io::{read_json_or_default, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GroupData {
    groups: Vec<Group>,
}

/// Repository for group persistence
pub struct GroupRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<GroupId, Group>>,
}

impl GroupRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load groups from disk; missing or corrupt data loads as empty
    pub fn load(&self) -> Result<(), SplitError> {
        let file_data: GroupData = read_json_or_default(&self.path);

        let mut data = self.data.write().map_err(lock_error)?;
        data.clear();
        for group in file_data.groups {
            data.insert(group.id, group);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), SplitError> {
        let data = self.data.read().map_err(lock_error)?;

        let file_data = GroupData {
            groups: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: GroupId) -> Result<Option<Group>, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all groups ordered by id
    pub fn get_all(&self) -> Result<Vec<Group>, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.values().cloned().collect())
    }

    /// Get a group by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Group>, SplitError> {
        let data = self.data.read().map_err(lock_error)?;

        let name = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|g| g.name.to_lowercase() == name)
            .cloned())
    }

    /// Groups the user belongs to (admins count as members)
    pub fn get_for_member(&self, user_id: UserId) -> Result<Vec<Group>, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data
            .values()
            .filter(|g| g.is_member(user_id))
            .cloned()
            .collect())
    }

    pub fn upsert(&self, group: Group) -> Result<(), SplitError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(group.id, group);
        Ok(())
    }

    /// Apply a change to a stored group in place, returning the updated copy
    pub fn update<F>(&self, id: GroupId, f: F) -> Result<Option<Group>, SplitError>
    where
        F: FnOnce(&mut Group),
    {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.get_mut(&id).map(|group| {
            f(group);
            group.clone()
        }))
    }

    /// Delete a group, returning it if it existed
    pub fn delete(&self, id: GroupId) -> Result<Option<Group>, SplitError> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&id))
    }

    /// Drop every record held in memory
    pub fn clear(&self) -> Result<(), SplitError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.clear();
        Ok(())
    }

    pub fn max_id(&self) -> Result<Option<u64>, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.keys().next_back().map(GroupId::value))
    }

    pub fn count(&self) -> Result<usize, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
