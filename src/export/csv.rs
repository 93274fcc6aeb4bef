//! CSV export of expenses, credits and budgets
//!
//! Amounts are written as plain decimals without a currency symbol.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{CategoryId, Money, Month};
use crate::storage::Storage;

fn to_export(err: csv::Error) -> ExpenseError {
    ExpenseError::Export(err.to_string())
}

fn decimal(amount: Money) -> String {
    amount.format_with_symbol("")
}

fn category_names(storage: &Storage) -> ExpenseResult<HashMap<CategoryId, String>> {
    Ok(storage
        .categories
        .get_all()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}

/// Export every expense, oldest first
pub fn export_expenses_csv<W: Write>(storage: &Storage, writer: W) -> ExpenseResult<usize> {
    let names = category_names(storage)?;
    let mut expenses = storage.expenses.get_all()?;
    expenses.reverse();

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["id", "date", "category", "description", "amount", "recurring_id"])
        .map_err(to_export)?;

    for expense in &expenses {
        csv.write_record([
            expense.id.as_uuid().to_string(),
            expense.date.to_string(),
            names
                .get(&expense.category_id)
                .cloned()
                .unwrap_or_else(|| "Unknown".into()),
            expense.description.clone(),
            decimal(expense.amount),
            expense
                .recurring_id
                .map(|id| id.as_uuid().to_string())
                .unwrap_or_default(),
        ])
        .map_err(to_export)?;
    }

    csv.flush()?;
    Ok(expenses.len())
}

/// Export every credit, oldest first
pub fn export_credits_csv<W: Write>(storage: &Storage, writer: W) -> ExpenseResult<usize> {
    let names = category_names(storage)?;
    let mut credits = storage.credits.get_all()?;
    credits.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["id", "date", "source", "category", "salary", "amount", "notes"])
        .map_err(to_export)?;

    for credit in &credits {
        let category = credit
            .category_id
            .map(|id| names.get(&id).cloned().unwrap_or_else(|| "Unknown".into()))
            .unwrap_or_default();
        csv.write_record([
            credit.id.as_uuid().to_string(),
            credit.date.to_string(),
            credit.source.clone(),
            category,
            credit.is_salary.to_string(),
            decimal(credit.amount),
            credit.notes.clone(),
        ])
        .map_err(to_export)?;
    }

    csv.flush()?;
    Ok(credits.len())
}

/// Export budgets, optionally restricted to one month
pub fn export_budgets_csv<W: Write>(
    storage: &Storage,
    writer: W,
    month: Option<Month>,
) -> ExpenseResult<usize> {
    let names = category_names(storage)?;
    let budgets = match month {
        Some(month) => storage.budgets.get_for_month(month)?,
        None => storage.budgets.get_all()?,
    };

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["month", "category", "amount", "carryover", "notes"])
        .map_err(to_export)?;

    for budget in &budgets {
        csv.write_record([
            budget.month.to_string(),
            names
                .get(&budget.category_id)
                .cloned()
                .unwrap_or_else(|| "Unknown".into()),
            decimal(budget.amount),
            decimal(budget.carryover),
            budget.notes.clone(),
        ])
        .map_err(to_export)?;
    }

    csv.flush()?;
    Ok(budgets.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::{Budget, Category, Credit, Expense};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_expenses_csv_quotes_descriptions() {
        let (_temp, storage) = storage();
        let food = Category::new("Food");
        storage.categories.upsert(food.clone()).unwrap();
        storage
            .expenses
            .upsert(Expense::with_description(food.id, Money::from_cents(1250), date(2), "Lunch, with team"))
            .unwrap();
        storage
            .expenses
            .upsert(Expense::new(food.id, Money::from_cents(300), date(1)))
            .unwrap();

        let mut out = Vec::new();
        assert_eq!(export_expenses_csv(&storage, &mut out).unwrap(), 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "id,date,category,description,amount,recurring_id");
        assert!(lines[1].contains("2025-03-01,Food,,3.00,"));
        assert!(lines[2].contains("\"Lunch, with team\",12.50"));
    }

    #[test]
    fn test_credits_csv_leaves_unassigned_blank() {
        let (_temp, storage) = storage();
        storage
            .credits
            .upsert(Credit::salary(Money::from_units(3000), date(28)))
            .unwrap();

        let mut out = Vec::new();
        export_credits_csv(&storage, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().nth(1).unwrap().contains(",,true,3000.00,"));
    }

    #[test]
    fn test_budgets_csv_month_filter() {
        let (_temp, storage) = storage();
        let rent = Category::new("Rent");
        storage.categories.upsert(rent.clone()).unwrap();
        let march = Month::new(2025, 3).unwrap();
        storage
            .budgets
            .upsert(Budget::new(rent.id, march, Money::from_units(1200)))
            .unwrap();
        storage
            .budgets
            .upsert(Budget::new(rent.id, march.next(), Money::from_units(1250)))
            .unwrap();

        let mut out = Vec::new();
        assert_eq!(export_budgets_csv(&storage, &mut out, Some(march)).unwrap(), 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("2025-03,Rent,1200.00,0.00,"));
    }
}
