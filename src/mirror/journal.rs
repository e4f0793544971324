//! Local outbox for mirror events
//!
//! Each event is appended as a single JSON line and flushed immediately,
//! ready to be replayed against the remote endpoint.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{SplitError, SplitResult};

use super::event::{MirrorEvent, MirrorRecord};
use super::MirrorSink;

/// Append-only JSONL journal of mirror events
pub struct JournalMirror {
    path: PathBuf,
}

impl JournalMirror {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Append one event to the journal
    pub fn append(&self, event: MirrorEvent) -> SplitResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| SplitError::Io(format!("Failed to open mirror journal: {}", e)))?;

        let json = serde_json::to_string(&MirrorRecord::new(event))
            .map_err(|e| SplitError::Json(format!("Failed to serialize mirror event: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| SplitError::Io(format!("Failed to write mirror event: {}", e)))?;

        file.flush()
            .map_err(|e| SplitError::Io(format!("Failed to flush mirror journal: {}", e)))?;

        Ok(())
    }

    /// Read every journaled event, oldest first
    pub fn read_all(&self) -> SplitResult<Vec<MirrorRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .map_err(|e| SplitError::Io(format!("Failed to open mirror journal: {}", e)))?;

        let mut records = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                SplitError::Io(format!("Failed to read mirror journal line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let record: MirrorRecord = serde_json::from_str(&line).map_err(|e| {
                SplitError::Json(format!(
                    "Failed to parse mirror event at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            records.push(record);
        }

        Ok(records)
    }
}

impl MirrorSink for JournalMirror {
    fn record(&self, event: MirrorEvent) {
        let kind = event.kind();
        match self.append(event) {
            Ok(()) => tracing::debug!(event = kind, "mirrored"),
            Err(e) => tracing::warn!(event = kind, error = %e, "mirror write failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn group_created(name: &str) -> MirrorEvent {
        MirrorEvent::GroupCreated {
            name: name.into(),
            currency: "INR".into(),
        }
    }

    #[test]
    fn test_append_and_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let journal = JournalMirror::new(temp_dir.path().join("mirror.jsonl"));

        journal.record(group_created("Goa Trip"));
        journal.record(group_created("Flat"));

        let records = journal.read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].event, group_created("Flat"));
    }

    #[test]
    fn test_missing_journal_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let journal = JournalMirror::new(temp_dir.path().join("mirror.jsonl"));
        assert!(journal.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let temp_dir = TempDir::new().unwrap();
        // a directory cannot be opened for appending
        let journal = JournalMirror::new(temp_dir.path().to_path_buf());
        journal.record(group_created("Goa Trip"));
        assert!(journal.append(group_created("Goa Trip")).is_err());
    }
}
