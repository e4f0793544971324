//! Settlement repository for JSON storage
//!
//! Settlements are append-only: the repository offers no update or delete.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SplitError;
use crate::models::{Settlement, SettlementId, UserId};

use super::file_io::{read_json_or_default, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SettlementData {
    settlements: Vec<Settlement>,
}

/// Repository for the append-only payment log
pub struct SettlementRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<SettlementId, Settlement>>,
}

impl SettlementRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load settlements from disk; missing or corrupt data loads as empty
    pub fn load(&self) -> Result<(), SplitError> {
        let file_data: SettlementData = read_json_or_default(&self.path);

        let mut data = self.data.write().map_err(lock_error)?;
        data.clear();
        for settlement in file_data.settlements {
            data.insert(settlement.id, settlement);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), SplitError> {
        let data = self.data.read().map_err(lock_error)?;

        let file_data = SettlementData {
            settlements: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get all settlements in the order they were recorded
    pub fn get_all(&self) -> Result<Vec<Settlement>, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.values().cloned().collect())
    }

    /// Settlements the user paid or received
    pub fn get_involving(&self, user_id: UserId) -> Result<Vec<Settlement>, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data
            .values()
            .filter(|s| s.from == user_id || s.to == user_id)
            .cloned()
            .collect())
    }

    /// Append a settlement. Existing records are never replaced.
    pub fn append(&self, settlement: Settlement) -> Result<(), SplitError> {
        let mut data = self.data.write().map_err(lock_error)?;

        if data.contains_key(&settlement.id) {
            return Err(SplitError::Duplicate {
                entity_type: "Settlement",
                identifier: settlement.id.to_string(),
            });
        }

        data.insert(settlement.id, settlement);
        Ok(())
    }

    /// Drop the whole log; the only way a recorded payment goes away
    pub fn clear(&self) -> Result<(), SplitError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.clear();
        Ok(())
    }

    pub fn max_id(&self) -> Result<Option<u64>, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.keys().next_back().map(SettlementId::value))
    }

    pub fn count(&self) -> Result<usize, SplitError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
