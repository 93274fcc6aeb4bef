//! Salary month tracking
//!
//! Shows, month by month, whether a salary credit arrived.

use std::collections::HashMap;

use crate::error::ExpenseResult;
use crate::models::{Credit, Money, Month};
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryMonth {
    pub month: Month,
    pub received: bool,
    pub total: Money,
    pub count: usize,
}

pub struct SalaryService<'a> {
    storage: &'a Storage,
}

impl<'a> SalaryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn salary_credits(&self) -> ExpenseResult<Vec<Credit>> {
        Ok(self
            .storage
            .credits
            .get_all()?
            .into_iter()
            .filter(|c| c.is_salary)
            .collect())
    }

    fn by_month(&self) -> ExpenseResult<HashMap<Month, (Money, usize)>> {
        let mut by_month: HashMap<Month, (Money, usize)> = HashMap::new();
        for credit in self.salary_credits()? {
            let entry = by_month.entry(credit.month()).or_default();
            entry.0 += credit.amount;
            entry.1 += 1;
        }
        Ok(by_month)
    }

    /// Twelve rows for `year`, January first
    pub fn months_tracking(&self, year: i32) -> ExpenseResult<Vec<SalaryMonth>> {
        let by_month = self.by_month()?;
        Ok(Month::year_months(year)
            .map(|month| {
                let (total, count) = by_month.get(&month).copied().unwrap_or_default();
                SalaryMonth {
                    month,
                    received: count > 0,
                    total,
                    count,
                }
            })
            .collect())
    }

    /// Months between `from` and `to` (inclusive) without a salary credit
    pub fn missing_months(&self, from: Month, to: Month) -> ExpenseResult<Vec<Month>> {
        let by_month = self.by_month()?;
        Ok(from
            .range_to(to)
            .into_iter()
            .filter(|month| !by_month.contains_key(month))
            .collect())
    }

    /// Most recent salary credit
    pub fn latest_salary(&self) -> ExpenseResult<Option<Credit>> {
        Ok(self.salary_credits()?.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, Storage::open(paths).unwrap())
    }

    fn pay(storage: &Storage, y: i32, m: u32, d: u32, units: i64) {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        storage
            .credits
            .upsert(Credit::salary(Money::from_units(units), date))
            .unwrap();
    }

    fn month(y: i32, m: u32) -> Month {
        Month::new(y, m).unwrap()
    }

    #[test]
    fn test_months_tracking() {
        let (_temp, storage) = storage();
        pay(&storage, 2025, 1, 25, 3000);
        pay(&storage, 2025, 3, 25, 3000);
        pay(&storage, 2025, 3, 28, 250);
        storage
            .credits
            .upsert(Credit::new(
                Money::from_units(40),
                NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
                "Refund",
            ))
            .unwrap();

        let rows = SalaryService::new(&storage).months_tracking(2025).unwrap();
        assert_eq!(rows.len(), 12);
        assert!(rows[0].received);
        assert!(!rows[1].received);
        assert_eq!(rows[2].count, 2);
        assert_eq!(rows[2].total, Money::from_units(3250));
    }

    #[test]
    fn test_missing_months_across_years() {
        let (_temp, storage) = storage();
        pay(&storage, 2024, 11, 30, 3000);
        pay(&storage, 2025, 1, 31, 3000);

        let missing = SalaryService::new(&storage)
            .missing_months(month(2024, 11), month(2025, 2))
            .unwrap();
        assert_eq!(missing, vec![month(2024, 12), month(2025, 2)]);
    }

    #[test]
    fn test_latest_salary() {
        let (_temp, storage) = storage();
        let service = SalaryService::new(&storage);
        assert!(service.latest_salary().unwrap().is_none());

        pay(&storage, 2025, 4, 25, 3100);
        pay(&storage, 2025, 5, 23, 3200);
        let latest = service.latest_salary().unwrap().unwrap();
        assert_eq!(latest.amount, Money::from_units(3200));
    }
}
