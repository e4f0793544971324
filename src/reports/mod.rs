//! Reports module for SplitSmart
//!
//! Analytics over the raw expense records: spending by category, a daily
//! trend for the acting user, top spenders and per-group totals.

pub mod categories;
pub mod groups;
pub mod spenders;
pub mod trend;

pub use categories::{Category, CategoryReport, CategorySpending};
pub use groups::{GroupSpending, GroupSpendingReport};
pub use spenders::{Spender, TopSpenders};
pub use trend::{SpendingTrend, TrendPoint, DEFAULT_TREND_DAYS, MAX_TREND_DAYS};
