//! Events sent to the remote mirror
//!
//! The mirror receives names rather than ids, so events are built from the
//! records after they have been resolved against the user table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::GroupId;

/// A create event mirrored to the remote store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MirrorEvent {
    GroupCreated {
        name: String,
        currency: String,
    },
    ExpenseCreated {
        group_id: GroupId,
        /// First payer's name
        payer: String,
        amount: f64,
        description: String,
        participants: Vec<String>,
    },
    SettlementRecorded {
        payer: String,
        recipient: String,
        amount: f64,
        method: String,
    },
}

impl MirrorEvent {
    /// Short label for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GroupCreated { .. } => "group_created",
            Self::ExpenseCreated { .. } => "expense_created",
            Self::SettlementRecorded { .. } => "settlement_recorded",
        }
    }
}

/// One line of the mirror journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorRecord {
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: MirrorEvent,
}

impl MirrorRecord {
    pub fn new(event: MirrorEvent) -> Self {
        Self {
            recorded_at: Utc::now(),
            event,
        }
    }
}
