//! expense-cli: a terminal personal expense tracker
//!
//! Records expenses, credits, per-category monthly budgets and recurring
//! expense schedules, and reconciles them into monthly summaries. Budget
//! carryover is disabled: every month starts from its own allowance.
//!
//! # Architecture
//!
//! - `config`: path resolution and user settings
//! - `error`: the crate-wide error type
//! - `models`: domain types (`Money`, `Month`, categories, expenses, ...)
//! - `storage`: JSON file repositories and the `Storage` coordinator
//! - `audit`: append-only change log
//! - `services`: business logic, including the monthly summaries
//! - `reports`: spending, trend and budget-vs-actual analytics
//! - `display`: terminal tables and charts
//! - `export`: CSV, JSON and YAML export
//! - `cli`: command handlers for the `expense` binary
//! - `tui`: the interactive dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_cli::config::ExpensePaths;
//! use expense_cli::services::SummaryService;
//! use expense_cli::storage::Storage;
//!
//! let storage = Storage::open(ExpensePaths::new()?)?;
//! let overview = SummaryService::new(&storage).month_overview(Month::current())?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{ExpenseError, ExpenseResult};
