//! User repository for JSON storage
//!
//! Manages loading and saving users to users.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SplitError;
use crate::models::{User, UserId};

use super::file_io::{read_json_or_default, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<UserId, User>>,
}

impl UserRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load users from disk; missing or corrupt data loads as empty
    pub fn load(&self) -> Result<(), SplitError> {
        let file_data: UserData = read_json_or_default(&self.path);

        let mut data = self.data.write().map_err(lock_error)?;
        data.clear();
        for user in file_data.users {
            data.insert(user.id, user);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), SplitError> {
        let data = self.data.read().map_err(lock_error)?;

        let file_data = UserData {
            users: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: UserId) -> Result<Option<User>, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all users ordered by id
    pub fn get_all(&self) -> Result<Vec<User>, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.values().cloned().collect())
    }

    /// Get a user by email (case-insensitive)
    pub fn get_by_email(&self, email: &str) -> Result<Option<User>, SplitError> {
        let data = self.data.read().map_err(lock_error)?;

        let email = email.trim().to_lowercase();
        Ok(data
            .values()
            .find(|u| u.email.to_lowercase() == email)
            .cloned())
    }

    /// Get a user by display name (case-insensitive); the first match by id wins
    pub fn get_by_name(&self, name: &str) -> Result<Option<User>, SplitError> {
        let data = self.data.read().map_err(lock_error)?;

        let name = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|u| u.name.to_lowercase() == name)
            .cloned())
    }

    /// Check if an email is already registered to someone other than `exclude_id`
    pub fn email_exists(&self, email: &str, exclude_id: Option<UserId>) -> Result<bool, SplitError> {
        let data = self.data.read().map_err(lock_error)?;

        let email = email.trim().to_lowercase();
        Ok(data
            .values()
            .any(|u| u.email.to_lowercase() == email && Some(u.id) != exclude_id))
    }

    /// Insert or update a user
    pub fn upsert(&self, user: User) -> Result<(), SplitError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(user.id, user);
        Ok(())
    }

    pub fn exists(&self, id: UserId) -> Result<bool, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.contains_key(&id))
    }

    /// Drop every record held in memory
    pub fn clear(&self) -> Result<(), SplitError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.clear();
        Ok(())
    }

    /// Highest id currently stored
    pub fn max_id(&self) -> Result<Option<u64>, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.keys().next_back().map(UserId::value))
    }

    pub fn count(&self) -> Result<usize, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
