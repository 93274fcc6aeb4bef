//! Budgets, monthly summaries and salary tracking

use std::collections::HashMap;

use crate::models::{Budget, CategoryId, Money, Month};
use crate::services::{MonthOverview, MonthlyBalance, SalaryMonth};

use super::category::label_for;
use super::report::format_percentage;
use super::table::render_table;

pub fn format_budget_list(
    month: Month,
    budgets: &[Budget],
    labels: &HashMap<CategoryId, String>,
    symbol: &str,
) -> String {
    if budgets.is_empty() {
        return format!("No budgets set for {}.\n", month.name());
    }

    let rows = budgets.iter().map(|b| {
        vec![
            label_for(labels, b.category_id),
            b.amount.format_with_symbol(symbol),
            b.carryover.format_with_symbol(symbol),
        ]
    });
    let total: Money = budgets.iter().map(|b| b.total_available()).sum();

    format!(
        "Budgets for {}\n{}\nTotal budgeted: {}\n",
        month.name(),
        render_table(&["Category", "Budget", "Carryover"], rows, 1),
        total.format_with_symbol(symbol)
    )
}

pub fn format_month_overview(overview: &MonthOverview, warning_percent: u8, symbol: &str) -> String {
    let money = |m: Money| m.format_with_symbol(symbol);

    let rows = overview.categories.iter().map(|s| {
        let flag = if s.is_overspent() {
            "OVER"
        } else if s.is_near_limit(warning_percent) {
            "near"
        } else {
            ""
        };
        vec![
            s.category.label(),
            money(s.budgeted),
            money(s.assigned_credits),
            money(s.spent),
            money(s.remaining),
            format_percentage(s.percent_used),
            flag.to_string(),
        ]
    });

    let mut output = format!("{}\n", overview.month.name());
    output.push_str(&render_table(
        &["Category", "Budgeted", "Credits", "Spent", "Remaining", "Used", ""],
        rows,
        1,
    ));
    output.push('\n');
    output.push_str(&format!("Budgeted:            {}\n", money(overview.total_budgeted)));
    output.push_str(&format!("Assigned credits:    {}\n", money(overview.total_assigned_credits)));
    output.push_str(&format!("Unassigned credits:  {}\n", money(overview.unassigned_credits)));
    output.push_str(&format!("Spent:               {}\n", money(overview.total_spent)));
    output.push_str(&format!("Remaining:           {}\n", money(overview.total_remaining)));
    output
}

pub fn format_balances(year: i32, balances: &[MonthlyBalance], symbol: &str) -> String {
    let money = |m: Money| m.format_with_symbol(symbol);
    let rows = balances.iter().map(|b| {
        vec![
            b.month.short_name(),
            money(b.budgeted),
            money(b.credits),
            money(b.spent),
            money(b.remaining),
            money(b.cumulative),
        ]
    });

    format!(
        "Remaining balances {}\n{}\n",
        year,
        render_table(
            &["Month", "Budgeted", "Credits", "Spent", "Remaining", "Cumulative"],
            rows,
            1
        )
    )
}

pub fn format_unassigned(year: i32, rows: &[(Month, Money)], symbol: &str) -> String {
    let total: Money = rows.iter().map(|(_, amount)| *amount).sum();
    let body = rows
        .iter()
        .map(|(month, amount)| vec![month.short_name(), amount.format_with_symbol(symbol)]);

    format!(
        "Unassigned credits {}\n{}\nTotal: {}\n",
        year,
        render_table(&["Month", "Unassigned"], body, 1),
        total.format_with_symbol(symbol)
    )
}

pub fn format_salary_tracking(year: i32, rows: &[SalaryMonth], symbol: &str) -> String {
    let received = rows.iter().filter(|r| r.received).count();
    let body = rows.iter().map(|r| {
        vec![
            r.month.short_name(),
            if r.received { "✓".into() } else { "✗".into() },
            r.count.to_string(),
            r.total.format_with_symbol(symbol),
        ]
    });

    format!(
        "Salary {}\n{}\nReceived in {} of {} months\n",
        year,
        render_table(&["Month", "Paid", "Payments", "Total"], body, 2),
        received,
        rows.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::services::CategorySummary;

    fn month(m: u32) -> Month {
        Month::new(2025, m).unwrap()
    }

    #[test]
    fn test_budget_list() {
        let cat = Category::new("Rent");
        let labels = HashMap::from([(cat.id, cat.label())]);
        let budgets = vec![Budget::new(cat.id, month(1), Money::from_units(1200))];

        let out = format_budget_list(month(1), &budgets, &labels, "$");
        assert!(out.contains("Budgets for January 2025"));
        assert!(out.contains("Total budgeted: $1200.00"));
        assert_eq!(format_budget_list(month(2), &[], &labels, "$"), "No budgets set for February 2025.\n");
    }

    #[test]
    fn test_month_overview_flags_overspent() {
        let overview = MonthOverview {
            month: month(3),
            categories: vec![CategorySummary {
                category: Category::new("Dining"),
                budgeted: Money::from_units(100),
                carryover: Money::zero(),
                assigned_credits: Money::zero(),
                spent: Money::from_units(120),
                remaining: Money::from_units(-20),
                percent_used: 120.0,
            }],
            total_budgeted: Money::from_units(100),
            total_assigned_credits: Money::zero(),
            total_spent: Money::from_units(120),
            unassigned_credits: Money::zero(),
            total_credits: Money::zero(),
            total_remaining: Money::from_units(-20),
        };

        let out = format_month_overview(&overview, 80, "$");
        assert!(out.contains("OVER"));
        assert!(out.contains("-$20.00"));
    }

    #[test]
    fn test_salary_tracking_counts_months() {
        let rows: Vec<_> = Month::year_months(2025)
            .map(|m| SalaryMonth {
                month: m,
                received: m.month() <= 3,
                total: Money::zero(),
                count: usize::from(m.month() <= 3),
            })
            .collect();
        assert!(format_salary_tracking(2025, &rows, "$").contains("Received in 3 of 12 months"));
    }
}
