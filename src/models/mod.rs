//! Core data models for SplitSmart
//!
//! The records owned by the ledger store: users, groups, expenses and
//! settlements, plus the id and money value types they are built from.

pub mod currency;
pub mod expense;
pub mod group;
pub mod ids;
pub mod money;
pub mod settlement;
pub mod user;

pub use currency::{Currency, DEFAULT_CONVERSION_RATE};
pub use expense::{Breakdown, Expense, ExpenseValidationError};
pub use group::{Group, GroupValidationError};
pub use ids::{ExpenseId, GroupId, SettlementId, UserId};
pub use money::{Money, MoneyParseError};
pub use settlement::{Settlement, SettlementValidationError};
pub use user::{ProfileEdit, User, UserValidationError};
