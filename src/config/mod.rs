//! Configuration module for expense-cli
//!
//! - Path resolution (env override or platform config directory)
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::Settings;
