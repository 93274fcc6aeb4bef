//! Terminal dashboard
//!
//! A full-screen ratatui view of one month: totals, the per-category
//! summary table and a spending chart.

pub mod app;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod views;

pub use app::App;
pub use terminal::run_tui;
