//! Storage layer for SplitSmart
//!
//! Provides JSON file storage with atomic writes, automatic directory
//! creation, and per-collection id sequences.

pub mod expenses;
pub mod file_io;
pub mod groups;
pub mod sequences;
pub mod settlements;
pub mod users;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use groups::GroupRepository;
pub use sequences::{Sequence, SequenceRepository};
pub use settlements::SettlementRepository;
pub use users::UserRepository;

use crate::config::paths::SplitPaths;
use crate::error::SplitError;
use crate::models::{ExpenseId, GroupId, SettlementId, UserId};

pub(crate) fn lock_error<E: std::fmt::Display>(e: E) -> SplitError {
    SplitError::Storage(format!("Failed to acquire lock: {}", e))
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SplitPaths,
    pub users: UserRepository,
    pub groups: GroupRepository,
    pub expenses: ExpenseRepository,
    pub settlements: SettlementRepository,
    sequences: SequenceRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: SplitPaths) -> Result<Self, SplitError> {
        paths.ensure_directories()?;

        Ok(Self {
            users: UserRepository::new(paths.users_file()),
            groups: GroupRepository::new(paths.groups_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            settlements: SettlementRepository::new(paths.settlements_file()),
            sequences: SequenceRepository::new(paths.sequences_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &SplitPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), SplitError> {
        self.users.load()?;
        self.groups.load()?;
        self.expenses.load()?;
        self.settlements.load()?;
        self.sequences.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SplitError> {
        self.users.save()?;
        self.groups.save()?;
        self.expenses.save()?;
        self.settlements.save()?;
        self.sequences.save()?;
        Ok(())
    }

    /// Wipe every collection and write the empty files back.
    ///
    /// The id sequences are kept, so ids issued before the wipe are never
    /// handed out again.
    pub fn clear_all(&self) -> Result<(), SplitError> {
        self.users.clear()?;
        self.groups.clear()?;
        self.expenses.clear()?;
        self.settlements.clear()?;
        self.save_all()
    }

    /// Persist the id high-water marks
    pub fn save_sequences(&self) -> Result<(), SplitError> {
        self.sequences.save()
    }

    pub fn next_user_id(&self) -> Result<UserId, SplitError> {
        let max = self.users.max_id()?;
        self.sequences.next(Sequence::Users, max).map(UserId::new)
    }

    pub fn next_group_id(&self) -> Result<GroupId, SplitError> {
        let max = self.groups.max_id()?;
        self.sequences.next(Sequence::Groups, max).map(GroupId::new)
    }

    pub fn next_expense_id(&self) -> Result<ExpenseId, SplitError> {
        let max = self.expenses.max_id()?;
        self.sequences.next(Sequence::Expenses, max).map(ExpenseId::new)
    }

    pub fn next_settlement_id(&self) -> Result<SettlementId, SplitError> {
        let max = self.settlements.max_id()?;
        self.sequences
            .next(Sequence::Settlements, max)
            .map(SettlementId::new)
    }

    /// Check if storage has been initialized (config file written)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_id_allocation_survives_reload() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();
        assert_eq!(storage.next_group_id().unwrap(), GroupId::new(101));
        assert_eq!(storage.next_user_id().unwrap(), UserId::new(1));
        storage.save_all().unwrap();

        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        assert_eq!(storage.next_group_id().unwrap(), GroupId::new(102));
        assert_eq!(storage.next_user_id().unwrap(), UserId::new(2));
    }

    #[test]
    fn test_clear_all_keeps_sequences() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();
        let id = storage.next_user_id().unwrap();
        storage
            .users
            .upsert(User::new(id, "Ananya", "ananya@example.com"))
            .unwrap();
        storage.save_all().unwrap();

        storage.clear_all().unwrap();
        assert_eq!(storage.users.count().unwrap(), 0);

        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        assert_eq!(storage.users.count().unwrap(), 0);
        assert_eq!(storage.next_user_id().unwrap(), UserId::new(2));
    }
}
