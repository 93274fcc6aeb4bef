//! Analytics reports
//!
//! Spending by category, month-over-month trends and budget vs actual.

pub mod budget_vs_actual;
pub mod spending;
pub mod trend;

pub use budget_vs_actual::{BudgetStatus, BudgetVsActualReport, BudgetVsActualRow};
pub use spending::{SpendingByCategory, SpendingReport};
pub use trend::{TrendReport, TrendRow};
