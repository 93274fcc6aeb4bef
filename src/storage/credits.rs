//! Credit repository backed by credits.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ExpenseError;
use crate::models::{CategoryId, Credit, CreditId, Month};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CreditData {
    credits: Vec<Credit>,
}

pub struct CreditRepository {
    path: PathBuf,
    data: RwLock<HashMap<CreditId, Credit>>,
}

impl CreditRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: CreditData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;
        data.clear();
        for credit in file_data.credits {
            data.insert(credit.id, credit);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), ExpenseError> {
        let file_data = CreditData {
            credits: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: CreditId) -> Result<Option<Credit>, ExpenseError> {
        Ok(read_lock(&self.data)?.get(&id).cloned())
    }

    /// All credits, newest first
    pub fn get_all(&self) -> Result<Vec<Credit>, ExpenseError> {
        self.filtered(|_| true)
    }

    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Credit>, ExpenseError> {
        self.filtered(|c| c.date >= start && c.date <= end)
    }

    pub fn get_for_month(&self, month: Month) -> Result<Vec<Credit>, ExpenseError> {
        self.filtered(|c| month.contains(c.date))
    }

    pub fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<Credit>, ExpenseError> {
        self.filtered(|c| c.category_id == Some(category_id))
    }

    /// Credits not assigned to any category
    pub fn get_unassigned(&self) -> Result<Vec<Credit>, ExpenseError> {
        self.filtered(Credit::is_unassigned)
    }

    fn filtered<F>(&self, keep: F) -> Result<Vec<Credit>, ExpenseError>
    where
        F: Fn(&Credit) -> bool,
    {
        let data = read_lock(&self.data)?;
        let mut list: Vec<_> = data.values().filter(|c| keep(*c)).cloned().collect();
        list.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(list)
    }

    pub fn upsert(&self, credit: Credit) -> Result<(), ExpenseError> {
        write_lock(&self.data)?.insert(credit.id, credit);
        Ok(())
    }

    pub fn delete(&self, id: CreditId) -> Result<bool, ExpenseError> {
        Ok(write_lock(&self.data)?.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, ExpenseError> {
        Ok(read_lock(&self.data)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn repo() -> (TempDir, CreditRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = CreditRepository::new(temp_dir.path().join("credits.json"));
        (temp_dir, repo)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_filters() {
        let (_temp, repo) = repo();
        let groceries = CategoryId::new();

        let mut refund = Credit::new(Money::from_cents(1500), date(2025, 5, 3), "Refund");
        refund.assign(Some(groceries));
        repo.upsert(refund).unwrap();
        repo.upsert(Credit::salary(Money::from_units(3000), date(2025, 5, 25))).unwrap();
        repo.upsert(Credit::new(Money::from_cents(2000), date(2025, 6, 1), "Gift")).unwrap();

        let may = Month::new(2025, 5).unwrap();
        assert_eq!(repo.get_for_month(may).unwrap().len(), 2);
        assert_eq!(repo.get_by_category(groceries).unwrap().len(), 1);
        assert_eq!(repo.get_unassigned().unwrap().len(), 2);
        assert_eq!(repo.get_all().unwrap()[0].source, "Gift");
    }

    #[test]
    fn test_save_and_reload() {
        let (temp, repo) = repo();
        let credit = Credit::salary(Money::from_units(2500), date(2025, 1, 28));
        let id = credit.id;
        repo.upsert(credit).unwrap();
        repo.save().unwrap();

        let reloaded = CreditRepository::new(temp.path().join("credits.json"));
        reloaded.load().unwrap();
        assert!(reloaded.get(id).unwrap().unwrap().is_salary);

        assert!(reloaded.delete(id).unwrap());
        assert_eq!(reloaded.count().unwrap(), 0);
    }
}
