//! Expense repository backed by expenses.json
//!
//! Keeps a category index so per-category queries do not scan every row.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ExpenseError;
use crate::models::{CategoryId, Expense, ExpenseId, Month, RecurringId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    by_category: RwLock<HashMap<CategoryId, Vec<ExpenseId>>>,
}

/// Newest first, ties broken by creation time
fn newest_first(list: &mut [Expense]) {
    list.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;
        let mut by_category = write_lock(&self.by_category)?;
        data.clear();
        by_category.clear();

        for expense in file_data.expenses {
            by_category
                .entry(expense.category_id)
                .or_default()
                .push(expense.id);
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), ExpenseError> {
        let file_data = ExpenseData {
            expenses: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        Ok(read_lock(&self.data)?.get(&id).cloned())
    }

    /// All expenses, newest first
    pub fn get_all(&self) -> Result<Vec<Expense>, ExpenseError> {
        let mut list: Vec<_> = read_lock(&self.data)?.values().cloned().collect();
        newest_first(&mut list);
        Ok(list)
    }

    pub fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<Expense>, ExpenseError> {
        let data = read_lock(&self.data)?;
        let by_category = read_lock(&self.by_category)?;

        let ids = by_category
            .get(&category_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut list: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        newest_first(&mut list);
        Ok(list)
    }

    /// Expenses dated between `start` and `end`, both inclusive
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, ExpenseError> {
        let data = read_lock(&self.data)?;
        let mut list: Vec<_> = data
            .values()
            .filter(|e| e.date >= start && e.date <= end)
            .cloned()
            .collect();
        newest_first(&mut list);
        Ok(list)
    }

    pub fn get_for_month(&self, month: Month) -> Result<Vec<Expense>, ExpenseError> {
        self.get_by_date_range(month.first_day(), month.last_day())
    }

    /// Expenses generated by a recurring schedule
    pub fn get_by_recurring(&self, recurring_id: RecurringId) -> Result<Vec<Expense>, ExpenseError> {
        let data = read_lock(&self.data)?;
        let mut list: Vec<_> = data
            .values()
            .filter(|e| e.recurring_id == Some(recurring_id))
            .cloned()
            .collect();
        newest_first(&mut list);
        Ok(list)
    }

    pub fn upsert(&self, expense: Expense) -> Result<(), ExpenseError> {
        let mut data = write_lock(&self.data)?;
        let mut by_category = write_lock(&self.by_category)?;

        if let Some(old) = data.get(&expense.id) {
            if let Some(ids) = by_category.get_mut(&old.category_id) {
                ids.retain(|&id| id != expense.id);
            }
        }

        by_category
            .entry(expense.category_id)
            .or_default()
            .push(expense.id);
        data.insert(expense.id, expense);

        Ok(())
    }

    pub fn delete(&self, id: ExpenseId) -> Result<bool, ExpenseError> {
        let mut data = write_lock(&self.data)?;
        let mut by_category = write_lock(&self.by_category)?;

        match data.remove(&id) {
            Some(old) => {
                if let Some(ids) = by_category.get_mut(&old.category_id) {
                    ids.retain(|&other| other != id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn count(&self) -> Result<usize, ExpenseError> {
        Ok(read_lock(&self.data)?.len())
    }
}
