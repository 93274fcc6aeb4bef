//! Month-over-month trend of spending and income

use crate::error::ExpenseResult;
use crate::models::{Money, Month};
use crate::services::{BudgetService, CreditService, ExpenseService};
use crate::storage::Storage;

#[derive(Debug, Clone, Copy)]
pub struct TrendRow {
    pub month: Month,
    pub expenses: Money,
    pub credits: Money,
    /// credits - expenses
    pub net: Money,
    pub budgeted: Money,
}

#[derive(Debug, Clone)]
pub struct TrendReport {
    /// Oldest first
    pub rows: Vec<TrendRow>,
    pub average_expenses: Money,
    pub average_credits: Money,
}

impl TrendReport {
    /// `months` rows ending with `end_month`
    pub fn generate(storage: &Storage, end_month: Month, months: u32) -> ExpenseResult<Self> {
        let expenses = ExpenseService::new(storage);
        let credits = CreditService::new(storage);
        let budgets = BudgetService::new(storage);

        let span = i32::try_from(months.max(1)).unwrap_or(i32::MAX);
        let start = end_month.offset(1 - span);

        let mut rows = Vec::new();
        for month in start.range_to(end_month) {
            let spent = expenses.total_for_month(month)?;
            let received = credits.total_for_month(month)?;
            rows.push(TrendRow {
                month,
                expenses: spent,
                credits: received,
                net: received - spent,
                budgeted: budgets.total_budgeted(month)?,
            });
        }

        let count = rows.len().max(1) as i64;
        let average = |total: Money| Money::from_cents(total.cents() / count);
        let average_expenses = average(rows.iter().map(|r| r.expenses).sum());
        let average_credits = average(rows.iter().map(|r| r.credits).sum());

        Ok(Self {
            rows,
            average_expenses,
            average_credits,
        })
    }

    /// Month with the highest spending
    pub fn peak_month(&self) -> Option<&TrendRow> {
        self.rows
            .iter()
            .filter(|r| r.expenses.is_positive())
            .max_by_key(|r| r.expenses)
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{:<10} {:>12} {:>12} {:>12} {:>12}\n",
            "Month", "Expenses", "Credits", "Net", "Budgeted"
        ));
        output.push_str(&"-".repeat(62));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<10} {:>12} {:>12} {:>12} {:>12}\n",
                row.month.short_name(),
                row.expenses,
                row.credits,
                row.net,
                row.budgeted
            ));
        }

        output.push_str(&"-".repeat(62));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>12} {:>12}\n",
            "Average", self.average_expenses, self.average_credits
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::{Budget, Category, Credit, Expense};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_trend_window_crosses_year() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        let cat = Category::new("Dining");
        storage.categories.upsert(cat.clone()).unwrap();

        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        storage
            .expenses
            .upsert(Expense::new(cat.id, Money::from_units(90), date(2024, 12, 5)))
            .unwrap();
        storage
            .expenses
            .upsert(Expense::new(cat.id, Money::from_units(30), date(2025, 2, 5)))
            .unwrap();
        storage
            .credits
            .upsert(Credit::new(Money::from_units(300), date(2025, 1, 15), "Salary"))
            .unwrap();
        storage
            .budgets
            .upsert(Budget::new(cat.id, Month::new(2025, 1).unwrap(), Money::from_units(100)))
            .unwrap();

        let end = Month::new(2025, 2).unwrap();
        let report = TrendReport::generate(&storage, end, 3).unwrap();

        let months: Vec<_> = report.rows.iter().map(|r| r.month.to_string()).collect();
        assert_eq!(months, vec!["2024-12", "2025-01", "2025-02"]);
        assert_eq!(report.rows[1].net, Money::from_units(300));
        assert_eq!(report.rows[1].budgeted, Money::from_units(100));
        assert_eq!(report.rows[0].net, Money::from_units(-90));
        assert_eq!(report.average_expenses, Money::from_units(40));
        assert_eq!(report.average_credits, Money::from_units(100));
        assert_eq!(report.peak_month().unwrap().month.to_string(), "2024-12");
    }
}
