//! Core data models for expense-cli
//!
//! Categories, expenses, credits, monthly budgets and recurring schedules,
//! plus the `Money` and `Month` value types they share.

pub mod budget;
pub mod category;
pub mod credit;
pub mod expense;
pub mod ids;
pub mod money;
pub mod month;
pub mod recurring;

pub use budget::{Budget, BudgetValidationError};
pub use category::{Category, CategoryValidationError, DEFAULT_CATEGORIES};
pub use credit::{Credit, CreditValidationError};
pub use expense::{Expense, ExpenseValidationError};
pub use ids::{BudgetId, CategoryId, CreditId, ExpenseId, RecurringId};
pub use money::{Money, MoneyParseError};
pub use month::{Month, MonthParseError};
pub use recurring::{RecurringExpense, RecurringValidationError};
