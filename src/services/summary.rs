//! Monthly reconciliation of budgets, credits and spending
//!
//! For a category in a month:
//!
//! ```text
//! remaining = budgeted + carryover + assigned credits - spent
//! ```
//!
//! Carryover is always zero. Credits without a category are reported per month
//! as unassigned and count towards the month's overall remaining balance, so
//! `total_remaining == total_budgeted + total_credits - total_spent`.

use std::collections::HashMap;

use tracing::debug;

use crate::error::ExpenseResult;
use crate::models::{Category, CategoryId, Money, Month};
use crate::storage::Storage;

/// Budget position of one category in one month
#[derive(Debug, Clone)]
pub struct CategorySummary {
    pub category: Category,
    pub budgeted: Money,
    pub carryover: Money,
    pub assigned_credits: Money,
    pub spent: Money,
    pub remaining: Money,
    /// Spent as a percentage of everything available to the category
    pub percent_used: f64,
}

impl CategorySummary {
    fn new(category: Category, budgeted: Money, assigned_credits: Money, spent: Money) -> Self {
        let carryover = Money::zero();
        let available = budgeted + carryover + assigned_credits;
        Self {
            category,
            budgeted,
            carryover,
            assigned_credits,
            spent,
            remaining: available - spent,
            percent_used: spent.percent_of(available),
        }
    }

    pub fn available(&self) -> Money {
        self.budgeted + self.carryover + self.assigned_credits
    }

    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }

    /// Spending has reached `warning_percent` of the available amount without going over
    pub fn is_near_limit(&self, warning_percent: u8) -> bool {
        !self.is_overspent()
            && self.available().is_positive()
            && self.percent_used >= f64::from(warning_percent)
    }

    fn has_activity(&self) -> bool {
        !(self.budgeted.is_zero() && self.assigned_credits.is_zero() && self.spent.is_zero())
    }
}

/// Everything shown for one month
#[derive(Debug, Clone)]
pub struct MonthOverview {
    pub month: Month,
    pub categories: Vec<CategorySummary>,
    pub total_budgeted: Money,
    pub total_assigned_credits: Money,
    pub total_spent: Money,
    pub unassigned_credits: Money,
    pub total_credits: Money,
    pub total_remaining: Money,
}

/// One row of the year view of remaining balances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyBalance {
    pub month: Month,
    pub budgeted: Money,
    pub credits: Money,
    pub spent: Money,
    pub remaining: Money,
    /// Running total of `remaining` from the first month holding any data
    pub cumulative: Money,
}

#[derive(Debug, Clone, Copy, Default)]
struct MonthTotals {
    budgeted: Money,
    credits: Money,
    spent: Money,
}

impl MonthTotals {
    fn remaining(&self) -> Money {
        self.budgeted + self.credits - self.spent
    }
}

pub struct SummaryService<'a> {
    storage: &'a Storage,
}

impl<'a> SummaryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Summaries for visible categories plus hidden ones with activity, by name
    pub fn category_summaries(&self, month: Month) -> ExpenseResult<Vec<CategorySummary>> {
        let mut budgeted: HashMap<CategoryId, Money> = HashMap::new();
        for budget in self.storage.budgets.get_for_month(month)? {
            *budgeted.entry(budget.category_id).or_default() += budget.total_available();
        }

        let mut credited: HashMap<CategoryId, Money> = HashMap::new();
        for credit in self.storage.credits.get_for_month(month)? {
            if let Some(category_id) = credit.category_id {
                *credited.entry(category_id).or_default() += credit.amount;
            }
        }

        let mut spent: HashMap<CategoryId, Money> = HashMap::new();
        for expense in self.storage.expenses.get_for_month(month)? {
            *spent.entry(expense.category_id).or_default() += expense.amount;
        }

        let summaries = self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .map(|category| {
                let id = category.id;
                CategorySummary::new(
                    category,
                    budgeted.get(&id).copied().unwrap_or_default(),
                    credited.get(&id).copied().unwrap_or_default(),
                    spent.get(&id).copied().unwrap_or_default(),
                )
            })
            .filter(|s| !s.category.hidden || s.has_activity())
            .collect();

        Ok(summaries)
    }

    pub fn month_overview(&self, month: Month) -> ExpenseResult<MonthOverview> {
        let categories = self.category_summaries(month)?;

        let total_budgeted: Money = categories.iter().map(|s| s.budgeted + s.carryover).sum();
        let total_assigned_credits: Money = categories.iter().map(|s| s.assigned_credits).sum();
        let total_spent: Money = categories.iter().map(|s| s.spent).sum();
        let category_remaining: Money = categories.iter().map(|s| s.remaining).sum();
        let unassigned_credits = self.unassigned_for_month(month)?;

        debug!(%month, categories = categories.len(), "built month overview");

        Ok(MonthOverview {
            month,
            categories,
            total_budgeted,
            total_assigned_credits,
            total_spent,
            unassigned_credits,
            total_credits: total_assigned_credits + unassigned_credits,
            total_remaining: category_remaining + unassigned_credits,
        })
    }

    /// Unassigned credits per month of `year`, zero for quiet months
    pub fn monthly_unassigned_credits(&self, year: i32) -> ExpenseResult<Vec<(Month, Money)>> {
        let mut by_month: HashMap<Month, Money> = HashMap::new();
        for credit in self.storage.credits.get_unassigned()? {
            if credit.month().year() == year {
                *by_month.entry(credit.month()).or_default() += credit.amount;
            }
        }

        Ok(Month::year_months(year)
            .map(|month| (month, by_month.get(&month).copied().unwrap_or_default()))
            .collect())
    }

    /// Remaining balance per month of `year` with a running total
    ///
    /// The running total starts at the earliest month that has any budget,
    /// credit or expense, so it already includes earlier years in January.
    pub fn monthly_remaining_balances(&self, year: i32) -> ExpenseResult<Vec<MonthlyBalance>> {
        let totals = self.totals_by_month()?;

        let mut cumulative: Money = totals
            .iter()
            .filter(|(month, _)| month.year() < year)
            .map(|(_, t)| t.remaining())
            .sum();

        let balances = Month::year_months(year)
            .map(|month| {
                let t = totals.get(&month).copied().unwrap_or_default();
                let remaining = t.remaining();
                cumulative += remaining;
                MonthlyBalance {
                    month,
                    budgeted: t.budgeted,
                    credits: t.credits,
                    spent: t.spent,
                    remaining,
                    cumulative,
                }
            })
            .collect();

        Ok(balances)
    }

    /// Categories whose remaining amount is below zero
    pub fn overspent_categories(&self, month: Month) -> ExpenseResult<Vec<CategorySummary>> {
        Ok(self
            .category_summaries(month)?
            .into_iter()
            .filter(CategorySummary::is_overspent)
            .collect())
    }

    fn unassigned_for_month(&self, month: Month) -> ExpenseResult<Money> {
        Ok(self
            .storage
            .credits
            .get_for_month(month)?
            .iter()
            .filter(|c| c.is_unassigned())
            .map(|c| c.amount)
            .sum())
    }

    fn totals_by_month(&self) -> ExpenseResult<HashMap<Month, MonthTotals>> {
        let mut totals: HashMap<Month, MonthTotals> = HashMap::new();

        for budget in self.storage.budgets.get_all()? {
            totals.entry(budget.month).or_default().budgeted += budget.total_available();
        }
        for credit in self.storage.credits.get_all()? {
            totals.entry(credit.month()).or_default().credits += credit.amount;
        }
        for expense in self.storage.expenses.get_all()? {
            totals.entry(expense.month()).or_default().spent += expense.amount;
        }

        Ok(totals)
    }
}
