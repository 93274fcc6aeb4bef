//! Budget vs actual spending for one month

use std::fmt;

use crate::error::ExpenseResult;
use crate::models::{Money, Month};
use crate::services::SummaryService;
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Under,
    Near,
    Over,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::Under => "under",
            BudgetStatus::Near => "near",
            BudgetStatus::Over => "over",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone)]
pub struct BudgetVsActualRow {
    pub category_label: String,
    pub budgeted: Money,
    pub spent: Money,
    /// budgeted - spent
    pub difference: Money,
    pub percent_used: f64,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone)]
pub struct BudgetVsActualReport {
    pub month: Month,
    pub rows: Vec<BudgetVsActualRow>,
    pub total_budgeted: Money,
    pub total_spent: Money,
}

impl BudgetVsActualReport {
    /// One row per category with a budget; `warning_percent` marks "near"
    pub fn generate(storage: &Storage, month: Month, warning_percent: u8) -> ExpenseResult<Self> {
        let summaries = SummaryService::new(storage).category_summaries(month)?;
        let budgeted_ids: Vec<_> = storage
            .budgets
            .get_for_month(month)?
            .into_iter()
            .map(|b| b.category_id)
            .collect();

        let rows: Vec<_> = summaries
            .into_iter()
            .filter(|s| budgeted_ids.contains(&s.category.id))
            .map(|s| {
                let percent_used = s.spent.percent_of(s.budgeted);
                let status = if s.spent > s.budgeted {
                    BudgetStatus::Over
                } else if s.budgeted.is_positive() && percent_used >= f64::from(warning_percent) {
                    BudgetStatus::Near
                } else {
                    BudgetStatus::Under
                };
                BudgetVsActualRow {
                    category_label: s.category.label(),
                    budgeted: s.budgeted,
                    spent: s.spent,
                    difference: s.budgeted - s.spent,
                    percent_used,
                    status,
                }
            })
            .collect();

        Ok(Self {
            month,
            total_budgeted: rows.iter().map(|r| r.budgeted).sum(),
            total_spent: rows.iter().map(|r| r.spent).sum(),
            rows,
        })
    }

    pub fn count(&self, status: BudgetStatus) -> usize {
        self.rows.iter().filter(|r| r.status == status).count()
    }

    pub fn format_terminal(&self) -> String {
        let mut output = format!("Budget vs Actual: {}\n", self.month.name());
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>11} {:>11} {:>11} {:>7}\n",
            "Category", "Budgeted", "Spent", "Left", "Status"
        ));

        for row in &self.rows {
            output.push_str(&format!(
                "{:<28} {:>11} {:>11} {:>11} {:>7}\n",
                row.category_label, row.budgeted, row.spent, row.difference, row.status
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>11} {:>11} {:>11}\n",
            "TOTAL",
            self.total_budgeted,
            self.total_spent,
            self.total_budgeted - self.total_spent
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::{Budget, Category, Expense};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_statuses() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        let month = Month::new(2025, 7).unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();

        let spend = |name: &str, budget: i64, spent: i64| {
            let cat = Category::new(name);
            storage
                .budgets
                .upsert(Budget::new(cat.id, month, Money::from_units(budget)))
                .unwrap();
            if spent > 0 {
                storage
                    .expenses
                    .upsert(Expense::new(cat.id, Money::from_units(spent), day))
                    .unwrap();
            }
            storage.categories.upsert(cat).unwrap();
        };
        spend("Dining", 100, 50);
        spend("Groceries", 100, 85);
        spend("Shopping", 100, 130);
        spend("Transport", 0, 0);

        let unbudgeted = Category::new("Health");
        storage.categories.upsert(unbudgeted).unwrap();

        let report = BudgetVsActualReport::generate(&storage, month, 80).unwrap();
        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.count(BudgetStatus::Under), 2);
        assert_eq!(report.count(BudgetStatus::Near), 1);
        assert_eq!(report.count(BudgetStatus::Over), 1);

        let shopping = report.rows.iter().find(|r| r.category_label == "Shopping").unwrap();
        assert_eq!(shopping.difference, Money::from_units(-30));
        assert_eq!(report.total_budgeted, Money::from_units(300));
        assert!(report.format_terminal().contains("Budget vs Actual: July 2025"));
    }
}
