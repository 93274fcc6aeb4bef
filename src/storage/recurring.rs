//! Recurring schedule repository backed by recurring.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::ExpenseError;
use crate::models::{CategoryId, RecurringExpense, RecurringId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RecurringData {
    schedules: Vec<RecurringExpense>,
}

pub struct RecurringRepository {
    path: PathBuf,
    data: RwLock<HashMap<RecurringId, RecurringExpense>>,
}

impl RecurringRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: RecurringData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;
        data.clear();
        for schedule in file_data.schedules {
            data.insert(schedule.id, schedule);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), ExpenseError> {
        let file_data = RecurringData {
            schedules: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: RecurringId) -> Result<Option<RecurringExpense>, ExpenseError> {
        Ok(read_lock(&self.data)?.get(&id).cloned())
    }

    /// All schedules, oldest first
    pub fn get_all(&self) -> Result<Vec<RecurringExpense>, ExpenseError> {
        let data = read_lock(&self.data)?;
        let mut list: Vec<_> = data.values().cloned().collect();
        list.sort_by_key(|r| r.created_at);
        Ok(list)
    }

    /// Schedules that are running and not yet exhausted
    pub fn get_active(&self) -> Result<Vec<RecurringExpense>, ExpenseError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|r| r.active && !r.is_exhausted())
            .collect())
    }

    pub fn get_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<RecurringExpense>, ExpenseError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|r| r.category_id == category_id)
            .collect())
    }

    pub fn upsert(&self, schedule: RecurringExpense) -> Result<(), ExpenseError> {
        write_lock(&self.data)?.insert(schedule.id, schedule);
        Ok(())
    }

    pub fn delete(&self, id: RecurringId) -> Result<bool, ExpenseError> {
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
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::TempDir;

    fn schedule(total: u32) -> RecurringExpense {
        RecurringExpense::new(
            CategoryId::new(),
            Money::from_units(15),
            1,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            total,
        )
    }

    #[test]
    fn test_active_excludes_paused_and_exhausted() {
        let temp_dir = TempDir::new().unwrap();
        let repo = RecurringRepository::new(temp_dir.path().join("recurring.json"));

        let running = schedule(3);
        let mut paused = schedule(3);
        paused.set_active(false);
        let mut done = schedule(1);
        done.mark_created();

        let running_id = running.id;
        repo.upsert(running).unwrap();
        repo.upsert(paused).unwrap();
        repo.upsert(done).unwrap();

        let active = repo.get_active().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, running_id);
        assert_eq!(repo.count().unwrap(), 3);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("recurring.json");
        let repo = RecurringRepository::new(path.clone());

        let mut rec = schedule(12);
        rec.mark_created();
        let id = rec.id;
        repo.upsert(rec).unwrap();
        repo.save().unwrap();

        let reloaded = RecurringRepository::new(path);
        reloaded.load().unwrap();
        let loaded = reloaded.get(id).unwrap().unwrap();
        assert_eq!(loaded.occurrences_created, 1);
        assert_eq!(loaded.remaining_occurrences(), 11);
    }
}
