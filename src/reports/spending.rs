//! Spending Report
//!
//! Spending by category for a date range.

use std::collections::HashMap;
use std::io::Write;

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{CategoryId, Money};
use crate::storage::Storage;

/// Spending of one category
#[derive(Debug, Clone)]
pub struct SpendingByCategory {
    pub category_id: CategoryId,
    /// Icon and name
    pub category_label: String,
    pub total: Money,
    pub expense_count: usize,
    /// Share of all spending in the range
    pub percentage: f64,
}

#[derive(Debug, Clone)]
pub struct SpendingReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Largest first
    pub categories: Vec<SpendingByCategory>,
    pub total_spent: Money,
    pub total_credits: Money,
    pub expense_count: usize,
}

impl SpendingReport {
    pub fn generate(
        storage: &Storage,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> ExpenseResult<Self> {
        let expenses = storage.expenses.get_by_date_range(start_date, end_date)?;
        let total_credits: Money = storage
            .credits
            .get_by_date_range(start_date, end_date)?
            .iter()
            .map(|c| c.amount)
            .sum();

        let mut by_category: HashMap<CategoryId, (Money, usize)> = HashMap::new();
        for expense in &expenses {
            let entry = by_category.entry(expense.category_id).or_default();
            entry.0 += expense.amount;
            entry.1 += 1;
        }
        let total_spent: Money = expenses.iter().map(|e| e.amount).sum();

        let mut categories = Vec::with_capacity(by_category.len());
        for (category_id, (total, expense_count)) in by_category {
            let category_label = match storage.categories.get(category_id)? {
                Some(category) => category.label(),
                None => format!("(deleted {})", category_id),
            };
            categories.push(SpendingByCategory {
                category_id,
                category_label,
                total,
                expense_count,
                percentage: total.percent_of(total_spent),
            });
        }
        categories.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category_label.cmp(&b.category_label))
        });

        Ok(Self {
            start_date,
            end_date,
            categories,
            total_spent,
            total_credits,
            expense_count: expenses.len(),
        })
    }

    pub fn top_categories(&self, limit: usize) -> &[SpendingByCategory] {
        &self.categories[..limit.min(self.categories.len())]
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Spending Report: {} to {}\n",
            self.start_date, self.end_date
        ));
        output.push_str(&"=".repeat(64));
        output.push('\n');
        output.push_str(&format!("Total Spent:   {}\n", self.total_spent));
        output.push_str(&format!("Total Credits: {}\n", self.total_credits));
        output.push_str(&format!("Expenses:      {}\n\n", self.expense_count));

        output.push_str(&format!(
            "{:<32} {:>12} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(64));
        output.push('\n');

        for row in &self.categories {
            output.push_str(&format!(
                "{:<32} {:>12} {:>8} {:>7.1}%\n",
                row.category_label, row.total, row.expense_count, row.percentage
            ));
        }

        output.push_str(&"-".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "{:<32} {:>12} {:>8}\n",
            "TOTAL", self.total_spent, self.expense_count
        ));

        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let to_export = |e: csv::Error| ExpenseError::Export(e.to_string());

        csv.write_record(["start_date", "end_date", "category", "amount", "count", "percentage"])
            .map_err(to_export)?;
        for row in &self.categories {
            csv.write_record([
                self.start_date.to_string(),
                self.end_date.to_string(),
                row.category_label.clone(),
                format!("{:.2}", row.total.cents() as f64 / 100.0),
                row.expense_count.to_string(),
                format!("{:.2}", row.percentage),
            ])
            .map_err(to_export)?;
        }

        csv.flush()
            .map_err(|e| ExpenseError::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::{Category, Credit, Expense};
    use tempfile::TempDir;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, Storage::open(paths).unwrap())
    }

    #[test]
    fn test_generate_spending_report() {
        let (_temp, storage) = storage();
        let food = Category::with_icon("Groceries", "🛒");
        let fun = Category::new("Entertainment");
        storage.categories.upsert(food.clone()).unwrap();
        storage.categories.upsert(fun.clone()).unwrap();

        for (cat, cents, d) in [(food.id, 6000, 3), (food.id, 1500, 9), (fun.id, 2500, 12)] {
            storage
                .expenses
                .upsert(Expense::new(cat, Money::from_cents(cents), date(1, d)))
                .unwrap();
        }
        storage
            .expenses
            .upsert(Expense::new(fun.id, Money::from_cents(99999), date(2, 1)))
            .unwrap();
        storage
            .credits
            .upsert(Credit::new(Money::from_units(50), date(1, 20), "Refund"))
            .unwrap();

        let report = SpendingReport::generate(&storage, date(1, 1), date(1, 31)).unwrap();

        assert_eq!(report.total_spent, Money::from_cents(10000));
        assert_eq!(report.total_credits, Money::from_units(50));
        assert_eq!(report.expense_count, 3);
        assert_eq!(report.categories[0].category_label, "🛒 Groceries");
        assert_eq!(report.categories[0].expense_count, 2);
        assert!((report.categories[0].percentage - 75.0).abs() < 1e-9);
        assert_eq!(report.top_categories(1).len(), 1);
        assert_eq!(report.top_categories(10).len(), 2);

        let text = report.format_terminal();
        assert!(text.contains("Spending Report: 2025-01-01 to 2025-01-31"));
    }

    #[test]
    fn test_empty_report() {
        let (_temp, storage) = storage();
        let report = SpendingReport::generate(&storage, date(3, 1), date(3, 31)).unwrap();
        assert!(report.categories.is_empty());
        assert!(report.total_spent.is_zero());
    }

    #[test]
    fn test_export_csv() {
        let (_temp, storage) = storage();
        let rent = Category::new("Rent");
        storage.categories.upsert(rent.clone()).unwrap();
        storage
            .expenses
            .upsert(Expense::new(rent.id, Money::from_units(1200), date(4, 1)))
            .unwrap();

        let report = SpendingReport::generate(&storage, date(4, 1), date(4, 30)).unwrap();
        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("start_date,end_date,category,amount,count,percentage\n"));
        assert!(text.contains("2025-04-01,2025-04-30,Rent,1200.00,1,100.00"));
    }
}
