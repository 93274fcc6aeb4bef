//! Full JSON export with schema versioning

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Budget, Category, Credit, Expense, RecurringExpense};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Every table plus a little metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Version of the application that wrote the export
    pub app_version: String,

    pub categories: Vec<Category>,
    pub expenses: Vec<Expense>,
    pub credits: Vec<Credit>,
    pub budgets: Vec<Budget>,
    pub recurring: Vec<RecurringExpense>,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub category_count: usize,
    pub expense_count: usize,
    pub credit_count: usize,
    pub budget_count: usize,
    pub recurring_count: usize,

    /// Earliest expense or credit date
    pub earliest_date: Option<NaiveDate>,

    /// Latest expense or credit date
    pub latest_date: Option<NaiveDate>,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> ExpenseResult<Self> {
        let categories = storage.categories.get_all()?;
        let expenses = storage.expenses.get_all()?;
        let credits = storage.credits.get_all()?;
        let budgets = storage.budgets.get_all()?;
        let recurring = storage.recurring.get_all()?;

        let dates = || {
            expenses
                .iter()
                .map(|e| e.date)
                .chain(credits.iter().map(|c| c.date))
        };

        let metadata = ExportMetadata {
            category_count: categories.len(),
            expense_count: expenses.len(),
            credit_count: credits.len(),
            budget_count: budgets.len(),
            recurring_count: recurring.len(),
            earliest_date: dates().min(),
            latest_date: dates().max(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            categories,
            expenses,
            credits,
            budgets,
            recurring,
            metadata,
        })
    }
}

pub fn export_full_json<W: Write>(storage: &Storage, writer: W, pretty: bool) -> ExpenseResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| ExpenseError::Export(e.to_string()))
}
