//! Terminal output formatting
//!
//! Tables are rendered with `tabled`; money columns take the configured
//! currency symbol.

pub mod audit;
pub mod category;
pub mod recurring;
pub mod report;
pub mod summary;
pub mod table;
pub mod transaction;

pub use audit::format_audit_entries;
pub use category::{category_labels, format_category_list, label_for};
pub use recurring::{format_schedule_list, format_upcoming};
pub use report::{format_bar, format_percentage, render_bar_chart};
pub use summary::{
    format_balances, format_budget_list, format_month_overview, format_salary_tracking,
    format_unassigned,
};
pub use table::render_table;
pub use transaction::{format_credit_list, format_expense_list};
