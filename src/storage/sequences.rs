//! Id sequences
//!
//! Each collection hands out ids from its own strictly increasing counter.
//! The high-water mark is persisted, so an id freed by a delete is never
//! handed out again.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::SplitError;

use super::file_io::{read_json_or_default, write_json_atomic};
use super::lock_error;

/// The collections that draw ids from a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    Users,
    Groups,
    Expenses,
    Settlements,
}

impl Sequence {
    /// First id handed out when the collection is empty
    pub fn base(&self) -> u64 {
        match self {
            Self::Users => 1,
            Self::Groups => 101,
            Self::Expenses => 1,
            Self::Settlements => 1,
        }
    }
}

/// Last id issued per collection (0 = none yet)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SequenceData {
    #[serde(default)]
    users: u64,
    #[serde(default)]
    groups: u64,
    #[serde(default)]
    expenses: u64,
    #[serde(default)]
    settlements: u64,
}

impl SequenceData {
    fn slot(&mut self, seq: Sequence) -> &mut u64 {
        match seq {
            Sequence::Users => &mut self.users,
            Sequence::Groups => &mut self.groups,
            Sequence::Expenses => &mut self.expenses,
            Sequence::Settlements => &mut self.settlements,
        }
    }
}

pub struct SequenceRepository {
    path: PathBuf,
    data: RwLock<SequenceData>,
}

impl SequenceRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(SequenceData::default()),
        }
    }

    pub fn load(&self) -> Result<(), SplitError> {
        let file_data: SequenceData = read_json_or_default(&self.path);
        let mut data = self.data.write().map_err(lock_error)?;
        *data = file_data;
        Ok(())
    }

    pub fn save(&self) -> Result<(), SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        write_json_atomic(&self.path, &*data)
    }

    /// Issue the next id for a collection.
    ///
    /// `existing_max` is the highest id currently stored; the counter never
    /// falls behind it, which also covers data written before the sequence
    /// file existed.
    pub fn next(&self, seq: Sequence, existing_max: Option<u64>) -> Result<u64, SplitError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let slot = data.slot(seq);

        let floor = (*slot).max(existing_max.unwrap_or(0));
        let id = if floor == 0 {
            seq.base()
        } else {
            (floor + 1).max(seq.base())
        };

        *slot = id;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, SequenceRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = SequenceRepository::new(temp_dir.path().join("sequences.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_bases() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.next(Sequence::Users, None).unwrap(), 1);
        assert_eq!(repo.next(Sequence::Groups, None).unwrap(), 101);
        assert_eq!(repo.next(Sequence::Groups, None).unwrap(), 102);
        assert_eq!(repo.next(Sequence::Settlements, None).unwrap(), 1);
    }

    #[test]
    fn test_never_reuses_freed_ids() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.next(Sequence::Expenses, None).unwrap(), 1);
        assert_eq!(repo.next(Sequence::Expenses, Some(1)).unwrap(), 2);
        // expense 2 deleted; the store now only holds 1
        assert_eq!(repo.next(Sequence::Expenses, Some(1)).unwrap(), 3);
    }

    #[test]
    fn test_catches_up_with_existing_data() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.next(Sequence::Users, Some(7)).unwrap(), 8);
    }

    #[test]
    fn test_persists_high_water_mark() {
        let (temp_dir, repo) = create_test_repo();
        repo.next(Sequence::Groups, None).unwrap();
        repo.next(Sequence::Groups, None).unwrap();
        repo.save().unwrap();

        let repo2 = SequenceRepository::new(temp_dir.path().join("sequences.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.next(Sequence::Groups, None).unwrap(), 103);
    }
}
