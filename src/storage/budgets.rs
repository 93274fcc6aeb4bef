//! Monthly budget repository backed by budgets.json
//!
//! At most one budget exists per (category, month) pair.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::ExpenseError;
use crate::models::{Budget, CategoryId, Month};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Composite key for budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BudgetKey {
    pub category_id: CategoryId,
    pub month: Month,
}

impl BudgetKey {
    pub fn new(category_id: CategoryId, month: Month) -> Self {
        Self { category_id, month }
    }

    fn of(budget: &Budget) -> Self {
        Self::new(budget.category_id, budget.month)
    }
}

pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetKey, Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = write_lock(&self.budgets)?;
        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(BudgetKey::of(&budget), budget);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), ExpenseError> {
        let file_data = BudgetData {
            budgets: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, category_id: CategoryId, month: Month) -> Result<Option<Budget>, ExpenseError> {
        let budgets = read_lock(&self.budgets)?;
        Ok(budgets.get(&BudgetKey::new(category_id, month)).cloned())
    }

    /// All budgets ordered by month
    pub fn get_all(&self) -> Result<Vec<Budget>, ExpenseError> {
        let budgets = read_lock(&self.budgets)?;
        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by_key(|b| (b.month, b.category_id));
        Ok(list)
    }

    pub fn get_for_month(&self, month: Month) -> Result<Vec<Budget>, ExpenseError> {
        let budgets = read_lock(&self.budgets)?;
        let mut list: Vec<_> = budgets
            .values()
            .filter(|b| b.month == month)
            .cloned()
            .collect();
        list.sort_by_key(|b| b.category_id);
        Ok(list)
    }

    pub fn get_for_category(&self, category_id: CategoryId) -> Result<Vec<Budget>, ExpenseError> {
        let budgets = read_lock(&self.budgets)?;
        let mut list: Vec<_> = budgets
            .values()
            .filter(|b| b.category_id == category_id)
            .cloned()
            .collect();
        list.sort_by_key(|b| b.month);
        Ok(list)
    }

    /// Insert or replace the budget for the budget's (category, month)
    pub fn upsert(&self, budget: Budget) -> Result<(), ExpenseError> {
        write_lock(&self.budgets)?.insert(BudgetKey::of(&budget), budget);
        Ok(())
    }

    pub fn delete(&self, category_id: CategoryId, month: Month) -> Result<Option<Budget>, ExpenseError> {
        let mut budgets = write_lock(&self.budgets)?;
        Ok(budgets.remove(&BudgetKey::new(category_id, month)))
    }

    /// Remove every budget of a category, returning what was removed
    pub fn delete_for_category(&self, category_id: CategoryId) -> Result<Vec<Budget>, ExpenseError> {
        let mut budgets = write_lock(&self.budgets)?;
        let keys: Vec<_> = budgets
            .keys()
            .filter(|k| k.category_id == category_id)
            .copied()
            .collect();
        Ok(keys.iter().filter_map(|k| budgets.remove(k)).collect())
    }

    pub fn count(&self) -> Result<usize, ExpenseError> {
        Ok(read_lock(&self.budgets)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        (temp_dir, repo)
    }

    fn month(y: i32, m: u32) -> Month {
        Month::new(y, m).unwrap()
    }

    #[test]
    fn test_one_budget_per_category_month() {
        let (_temp, repo) = repo();
        let cat = CategoryId::new();

        repo.upsert(Budget::new(cat, month(2025, 1), Money::from_units(100))).unwrap();
        repo.upsert(Budget::new(cat, month(2025, 1), Money::from_units(150))).unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        let budget = repo.get(cat, month(2025, 1)).unwrap().unwrap();
        assert_eq!(budget.amount, Money::from_units(150));
    }

    #[test]
    fn test_queries_and_delete_for_category() {
        let (_temp, repo) = repo();
        let food = CategoryId::new();
        let rent = CategoryId::new();

        repo.upsert(Budget::new(food, month(2025, 1), Money::from_units(400))).unwrap();
        repo.upsert(Budget::new(food, month(2025, 2), Money::from_units(400))).unwrap();
        repo.upsert(Budget::new(rent, month(2025, 1), Money::from_units(1200))).unwrap();

        assert_eq!(repo.get_for_month(month(2025, 1)).unwrap().len(), 2);
        assert_eq!(repo.get_for_category(food).unwrap().len(), 2);

        let removed = repo.delete_for_category(food).unwrap();
        assert_eq!(removed.len(), 2);
        assert!(repo.get_for_category(food).unwrap().is_empty());
        assert_eq!(repo.count().unwrap(), 1);

        assert!(repo.delete(rent, month(2025, 1)).unwrap().is_some());
        assert!(repo.delete(rent, month(2025, 1)).unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp, repo) = repo();
        let cat = CategoryId::new();
        repo.upsert(Budget::new(cat, month(2024, 12), Money::from_units(75))).unwrap();
        repo.save().unwrap();

        let reloaded = BudgetRepository::new(temp.path().join("budgets.json"));
        reloaded.load().unwrap();
        let budget = reloaded.get(cat, month(2024, 12)).unwrap().unwrap();
        assert_eq!(budget.carryover, Money::zero());
    }
}
