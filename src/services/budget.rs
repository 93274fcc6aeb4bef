//! Monthly budget service
//!
//! Budgets are per category and month. Carryover between months is disabled,
//! so every budget starts from its own allowance only.

use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Budget, CategoryId, Money, Month};
use crate::storage::Storage;

pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create or replace the budget of a category for a month
    pub fn set_budget(
        &self,
        category_id: CategoryId,
        month: Month,
        amount: Money,
    ) -> ExpenseResult<Budget> {
        let category = self
            .storage
            .categories
            .get(category_id)?
            .ok_or_else(|| ExpenseError::category_not_found(category_id.to_string()))?;

        let existing = self.storage.budgets.get(category_id, month)?;
        let mut budget = existing
            .clone()
            .unwrap_or_else(|| Budget::new(category_id, month, amount));
        budget.set_amount(amount);

        budget
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        let label = Some(format!("{} {}", category.name, month));
        match existing {
            Some(before) => self.storage.log_update(
                EntityType::Budget,
                budget.id.to_string(),
                label,
                &before,
                &budget,
            )?,
            None => self.storage.log_create(
                EntityType::Budget,
                budget.id.to_string(),
                label,
                &budget,
            )?,
        }

        info!(category = %category.name, %month, amount = %amount, "set budget");
        Ok(budget)
    }

    pub fn get_budget(&self, category_id: CategoryId, month: Month) -> ExpenseResult<Option<Budget>> {
        self.storage.budgets.get(category_id, month)
    }

    pub fn budgets_for_month(&self, month: Month) -> ExpenseResult<Vec<Budget>> {
        self.storage.budgets.get_for_month(month)
    }

    pub fn delete_budget(&self, category_id: CategoryId, month: Month) -> ExpenseResult<Budget> {
        let budget = self
            .storage
            .budgets
            .delete(category_id, month)?
            .ok_or_else(|| ExpenseError::NotFound {
                entity_type: "Budget",
                identifier: format!("{} {}", category_id, month),
            })?;
        self.storage.budgets.save()?;

        self.storage.log_delete(
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.month.to_string()),
            &budget,
        )?;

        Ok(budget)
    }

    /// Copy the previous month's budgets into `month`
    ///
    /// Existing budgets in `month` are kept unless `overwrite` is set. Returns
    /// the number of budgets written.
    pub fn copy_from_previous(&self, month: Month, overwrite: bool) -> ExpenseResult<usize> {
        let previous = self.storage.budgets.get_for_month(month.prev())?;
        if previous.is_empty() {
            return Err(ExpenseError::Budget(format!(
                "No budgets found for {} to copy",
                month.prev()
            )));
        }

        let mut written = 0;
        for source in previous {
            if !overwrite && self.storage.budgets.get(source.category_id, month)?.is_some() {
                continue;
            }
            if self.storage.categories.get(source.category_id)?.is_none() {
                continue;
            }
            self.set_budget(source.category_id, month, source.amount)?;
            written += 1;
        }

        debug!(%month, written, "copied budgets from previous month");
        Ok(written)
    }

    pub fn total_budgeted(&self, month: Month) -> ExpenseResult<Money> {
        Ok(self
            .storage
            .budgets
            .get_for_month(month)?
            .iter()
            .map(Budget::total_available)
            .sum())
    }

    /// Amount carried into `month` for a category; carryover is disabled
    pub fn carryover(&self, _category_id: CategoryId, _month: Month) -> Money {
        Money::zero()
    }
}
