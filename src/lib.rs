//! SplitSmart - Terminal shared-expense tracker
//!
//! This library provides the core functionality for the SplitSmart CLI. Users
//! form groups, record shared expenses with flexible splits, pay each other
//! back, and ask who owes whom. Balances are always recomputed from the raw
//! records, and the debt graph is simplified into a short list of payments.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (users, groups, expenses, settlements)
//! - `storage`: JSON file storage layer
//! - `ledger`: Debt matrix construction and settlement simplification
//! - `services`: Business logic layer
//! - `mirror`: Fire-and-forget forwarding of create events
//! - `reports`: Spending analytics
//! - `export`: JSON, YAML and CSV export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use splitsmart::config::paths::SplitPaths;
//! use splitsmart::services::BalanceService;
//! use splitsmart::storage::Storage;
//!
//! let mut storage = Storage::new(SplitPaths::new()?)?;
//! storage.load_all()?;
//! let plan = BalanceService::new(&storage, 83.5).plan()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod logging;
pub mod mirror;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SplitError, SplitResult};
