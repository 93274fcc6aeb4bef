//! Service layer
//!
//! Business rules on top of the repositories: validation, cross-table
//! cascades, recurring expense processing and the monthly reconciliation.

pub mod budget;
pub mod category;
pub mod credit;
pub mod expense;
pub mod recurring;
pub mod salary;
pub mod summary;

pub use budget::BudgetService;
pub use category::{CategoryDeletion, CategoryService};
pub use credit::{CreateCreditInput, CreditFilter, CreditService, UpdateCreditInput};
pub use expense::{CreateExpenseInput, ExpenseFilter, ExpenseService, UpdateExpenseInput};
pub use recurring::{
    CreateRecurringInput, RecurringService, UpcomingOccurrence, UpdateRecurringInput,
};
pub use salary::{SalaryMonth, SalaryService};
pub use summary::{CategorySummary, MonthOverview, MonthlyBalance, SummaryService};
