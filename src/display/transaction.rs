//! Expense and credit lists

use std::collections::HashMap;

use crate::models::{CategoryId, Credit, Expense, Money};

use super::category::label_for;
use super::table::render_table;

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

pub fn format_expense_list(
    expenses: &[Expense],
    labels: &HashMap<CategoryId, String>,
    symbol: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| {
        vec![
            e.id.to_string(),
            e.date.to_string(),
            label_for(labels, e.category_id),
            truncate(&e.description, 40),
            if e.is_recurring() { "↻".into() } else { String::new() },
            e.amount.format_with_symbol(symbol),
        ]
    });

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    format!(
        "{}\n{} expenses, total {}\n",
        render_table(&["ID", "Date", "Category", "Description", "", "Amount"], rows, 5),
        expenses.len(),
        total.format_with_symbol(symbol)
    )
}

pub fn format_credit_list(
    credits: &[Credit],
    labels: &HashMap<CategoryId, String>,
    symbol: &str,
) -> String {
    if credits.is_empty() {
        return "No credits found.\n".to_string();
    }

    let rows = credits.iter().map(|c| {
        vec![
            c.id.to_string(),
            c.date.to_string(),
            truncate(&c.source, 30),
            match c.category_id {
                Some(id) => label_for(labels, id),
                None => "(unassigned)".to_string(),
            },
            if c.is_salary { "salary".into() } else { String::new() },
            c.amount.format_with_symbol(symbol),
        ]
    });

    let total: Money = credits.iter().map(|c| c.amount).sum();
    format!(
        "{}\n{} credits, total {}\n",
        render_table(&["ID", "Date", "Source", "Category", "", "Amount"], rows, 5),
        credits.len(),
        total.format_with_symbol(symbol)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_expense_list_totals() {
        let cat = CategoryId::new();
        let labels = HashMap::from([(cat, "🛒 Groceries".to_string())]);
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let expenses = vec![
            Expense::with_description(cat, Money::from_cents(4599), date, "Weekly shop"),
            Expense::new(cat, Money::from_cents(401), date),
        ];

        let out = format_expense_list(&expenses, &labels, "€");
        assert!(out.contains("🛒 Groceries"));
        assert!(out.contains("€45.99"));
        assert!(out.contains("2 expenses, total €50.00"));
        assert_eq!(format_expense_list(&[], &labels, "$"), "No expenses found.\n");
    }

    #[test]
    fn test_credit_list_marks_unassigned() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 25).unwrap();
        let credits = vec![Credit::salary(Money::from_units(3000), date)];

        let out = format_credit_list(&credits, &HashMap::new(), "$");
        assert!(out.contains("(unassigned)"));
        assert!(out.contains("salary"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long description", 6), "a lon…");
    }
}
