//! Expense service

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{CategoryId, Expense, ExpenseId, Money, Month};
use crate::storage::Storage;

pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub month: Option<Month>,
    pub category_id: Option<CategoryId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive substring of the description
    pub search: Option<String>,
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, expense: &Expense) -> bool {
        if self.month.is_some_and(|m| !m.contains(expense.date)) {
            return false;
        }
        if self.category_id.is_some_and(|c| c != expense.category_id) {
            return false;
        }
        if self.start_date.is_some_and(|start| expense.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| expense.date > end) {
            return false;
        }
        match &self.search {
            Some(text) => expense
                .description
                .to_lowercase()
                .contains(&text.to_lowercase()),
            None => true,
        }
    }
}

/// Input for creating an expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub category_id: CategoryId,
    pub amount: Money,
    pub date: NaiveDate,
    pub description: Option<String>,
}

/// Fields to change on an existing expense; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    pub category_id: Option<CategoryId>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: CreateExpenseInput) -> ExpenseResult<Expense> {
        self.ensure_category(input.category_id)?;

        let mut expense = Expense::new(input.category_id, input.amount, input.date);
        if let Some(description) = input.description {
            expense.description = description.trim().to_string();
        }

        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        info!(amount = %expense.amount, date = %expense.date, "recorded expense");
        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find by full or short id
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Expense>> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return self.storage.expenses.get(id);
        }

        Ok(self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .find(|e| e.id.matches(identifier)))
    }

    /// Expenses matching the filter, newest first
    pub fn list(&self, filter: ExpenseFilter) -> ExpenseResult<Vec<Expense>> {
        let candidates = match (filter.category_id, filter.month) {
            (Some(category_id), _) => self.storage.expenses.get_by_category(category_id)?,
            (None, Some(month)) => self.storage.expenses.get_for_month(month)?,
            (None, None) => self.storage.expenses.get_all()?,
        };

        let matching = candidates.into_iter().filter(|e| filter.matches(e));
        let list = match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        };

        Ok(list)
    }

    pub fn update(&self, id: ExpenseId, input: UpdateExpenseInput) -> ExpenseResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
        let before = expense.clone();

        if let Some(category_id) = input.category_id {
            self.ensure_category(category_id)?;
            expense.category_id = category_id;
        }
        if let Some(amount) = input.amount {
            expense.amount = amount;
        }
        if let Some(date) = input.date {
            expense.date = date;
        }
        if let Some(description) = input.description {
            expense.description = description.trim().to_string();
        }

        expense.touch();
        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_update(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &before,
            &expense,
        )?;

        Ok(expense)
    }

    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        debug!(id = %expense.id, "deleted expense");
        Ok(expense)
    }

    pub fn total_for_month(&self, month: Month) -> ExpenseResult<Money> {
        Ok(self
            .storage
            .expenses
            .get_for_month(month)?
            .iter()
            .map(|e| e.amount)
            .sum())
    }

    fn ensure_category(&self, id: CategoryId) -> ExpenseResult<()> {
        match self.storage.categories.get(id)? {
            Some(_) => Ok(()),
            None => Err(ExpenseError::category_not_found(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::Category;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, CategoryId) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        let category = Category::new("Groceries");
        let id = category.id;
        storage.categories.upsert(category).unwrap();
        (temp_dir, storage, id)
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn input(category_id: CategoryId, cents: i64, date: NaiveDate, text: &str) -> CreateExpenseInput {
        CreateExpenseInput {
            category_id,
            amount: Money::from_cents(cents),
            date,
            description: Some(text.to_string()),
        }
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let (_temp, storage, cat) = setup();
        let service = ExpenseService::new(&storage);

        assert!(service
            .create(input(cat, 0, date(1, 1), "free"))
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(input(cat, -500, date(1, 1), "refund"))
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(input(CategoryId::new(), 500, date(1, 1), "lost"))
            .unwrap_err()
            .is_not_found());
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_list_filters_and_order() {
        let (_temp, storage, cat) = setup();
        let service = ExpenseService::new(&storage);

        service.create(input(cat, 1000, date(3, 2), "Weekly shop")).unwrap();
        service.create(input(cat, 450, date(3, 20), "Bakery")).unwrap();
        service.create(input(cat, 3000, date(4, 1), "Weekly shop")).unwrap();

        let march = service
            .list(ExpenseFilter::new().month(Month::new(2025, 3).unwrap()))
            .unwrap();
        assert_eq!(march.len(), 2);
        assert_eq!(march[0].description, "Bakery");

        let shops = service.list(ExpenseFilter::new().search("weekly")).unwrap();
        assert_eq!(shops.len(), 2);

        let limited = service.list(ExpenseFilter::new().category(cat).limit(1)).unwrap();
        assert_eq!(limited[0].date, date(4, 1));

        let ranged = service
            .list(ExpenseFilter::new().date_range(date(3, 10), date(3, 31)))
            .unwrap();
        assert_eq!(ranged.len(), 1);
    }

    #[test]
    fn test_update_delete_and_total() {
        let (_temp, storage, cat) = setup();
        let service = ExpenseService::new(&storage);
        let expense = service.create(input(cat, 1000, date(5, 5), "Lunch")).unwrap();

        let updated = service
            .update(
                expense.id,
                UpdateExpenseInput {
                    amount: Some(Money::from_cents(1250)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount.cents(), 1250);
        assert_eq!(updated.description, "Lunch");

        let bad = UpdateExpenseInput {
            amount: Some(Money::zero()),
            ..Default::default()
        };
        assert!(service.update(expense.id, bad).is_err());

        let may = Month::new(2025, 5).unwrap();
        assert_eq!(service.total_for_month(may).unwrap().cents(), 1250);

        assert_eq!(service.find(&expense.id.short()).unwrap().unwrap().id, expense.id);
        service.delete(expense.id).unwrap();
        assert!(service.total_for_month(may).unwrap().is_zero());
        assert!(service.delete(expense.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_changes_are_audited() {
        let (_temp, storage, cat) = setup();
        let service = ExpenseService::new(&storage);
        let expense = service.create(input(cat, 800, date(2, 2), "Taxi")).unwrap();
        service.delete(expense.id).unwrap();

        assert_eq!(storage.audit().entry_count().unwrap(), 2);
    }
}
