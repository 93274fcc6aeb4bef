//! CLI command handlers
//!
//! Bridges the clap argument definitions with the service layer. Every
//! handler takes the loaded storage and settings and prints its result.

pub mod audit;
pub mod budget;
pub mod category;
pub mod credit;
pub mod expense;
pub mod export;
pub mod recurring;
pub mod report;
pub mod summary;

use chrono::{Datelike, Local, NaiveDate, NaiveTime};

pub use audit::handle_audit_command;
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use credit::{handle_credit_command, CreditCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use recurring::{handle_recurring_command, RecurringCommands};
pub use report::{handle_report_command, ReportCommands};
pub use summary::{handle_summary_command, SummaryCommands};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::month::{MAX_YEAR, MIN_YEAR};
use crate::models::{Money, Month};
use crate::services::RecurringService;
use crate::storage::Storage;

pub(crate) fn parse_amount(s: &str) -> ExpenseResult<Money> {
    Money::parse(s).map_err(|e| ExpenseError::Validation(format!("Invalid amount: {}", e)))
}

/// Parse `YYYY-MM-DD`, or today when absent
pub(crate) fn parse_date(s: Option<&str>) -> ExpenseResult<NaiveDate> {
    match s {
        None => Ok(Local::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .ok()
            .filter(|date| (MIN_YEAR..=MAX_YEAR).contains(&date.year()))
            .ok_or_else(|| {
                ExpenseError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
            }),
    }
}

/// Parse a month argument, or the current month when absent
pub(crate) fn parse_month(s: Option<&str>) -> ExpenseResult<Month> {
    match s {
        None => Ok(Month::current()),
        Some(s) => Month::parse(s).map_err(|e| ExpenseError::Validation(e.to_string())),
    }
}

pub(crate) fn parse_time(s: &str) -> ExpenseResult<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| ExpenseError::Validation(format!("Invalid time '{}'. Use HH:MM", s)))
}

/// Insert every recurring expense that has come due
///
/// Runs before commands that change data so reads see the scheduled rows.
pub fn run_due_schedules(storage: &Storage) -> ExpenseResult<usize> {
    let created = RecurringService::new(storage).process_due(Local::now().naive_local())?;
    if !created.is_empty() {
        println!(
            "Added {} scheduled expense{}.",
            created.len(),
            if created.len() == 1 { "" } else { "s" }
        );
    }
    Ok(created.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.5").unwrap().cents(), 1250);
        assert!(parse_amount("abc").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2025-02-28")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert!(parse_date(Some("2025-02-30")).is_err());
        assert!(parse_date(Some("20000-01-01")).is_err());
        assert_eq!(parse_date(None).unwrap(), Local::now().date_naive());
    }

    #[test]
    fn test_parse_month_and_time() {
        assert_eq!(parse_month(Some("2024-12")).unwrap(), Month::new(2024, 12).unwrap());
        assert_eq!(parse_month(None).unwrap(), Month::current());
        assert!(parse_month(Some("2024-13")).is_err());

        assert_eq!(parse_time("07:30").unwrap(), NaiveTime::from_hms_opt(7, 30, 0).unwrap());
        assert!(parse_time("7pm").is_err());
    }
}
