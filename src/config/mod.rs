//! Configuration module for SplitSmart
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence (acting user, conversion rate, mirror toggle)

pub mod paths;
pub mod settings;

pub use paths::SplitPaths;
pub use settings::Settings;
