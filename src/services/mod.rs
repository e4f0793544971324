//! Service layer for SplitSmart
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, mirroring of create events, and the balance queries
//! that run the ledger engine.

pub mod balance;
pub mod expense;
pub mod group;
pub mod settlement;
pub mod user;

pub use balance::BalanceService;
pub use expense::{ExpenseService, NewExpense};
pub use group::{CreateGroupInput, GroupDetails, GroupService, GroupUpdate};
pub use settlement::{describe_method, SettlementService};
pub use user::{MemberInput, UserService};
