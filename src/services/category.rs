//! Category service
//!
//! CRUD for categories plus the cascade that runs when one is deleted.

use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, CategoryId};
use crate::storage::Storage;

pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// What a category deletion removed or changed
#[derive(Debug, Clone)]
pub struct CategoryDeletion {
    pub category: Category,
    pub budgets_removed: usize,
    pub credits_unassigned: usize,
    pub expenses_deleted: usize,
    pub schedules_deleted: usize,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a category; names are unique ignoring case
    pub fn create(
        &self,
        name: &str,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> ExpenseResult<Category> {
        let name = name.trim();
        self.ensure_unique_name(name, None)?;

        let mut category = Category::new(name);
        category.icon = icon.map(str::trim).filter(|i| !i.is_empty()).map(String::from);
        category.color = color.map(str::trim).filter(|c| !c.is_empty()).map(String::from);

        category
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        info!(category = %category.name, "created category");
        Ok(category)
    }

    pub fn get(&self, id: CategoryId) -> ExpenseResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name, full id or short id
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }

        Ok(self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .find(|c| c.id.matches(identifier)))
    }

    /// Like `find`, but a missing category is an error
    pub fn require(&self, identifier: &str) -> ExpenseResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::category_not_found(identifier))
    }

    /// Categories sorted by name
    pub fn list(&self, include_hidden: bool) -> ExpenseResult<Vec<Category>> {
        Ok(self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .filter(|c| include_hidden || !c.hidden)
            .collect())
    }

    /// Change any of name, icon or color; an empty icon or color clears it
    pub fn update(
        &self,
        id: CategoryId,
        name: Option<&str>,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> ExpenseResult<Category> {
        let mut category = self.load(id)?;
        let before = category.clone();

        if let Some(new_name) = name {
            let new_name = new_name.trim();
            self.ensure_unique_name(new_name, Some(id))?;
            category.name = new_name.to_string();
        }
        if let Some(icon) = icon {
            let icon = icon.trim();
            category.icon = (!icon.is_empty()).then(|| icon.to_string());
        }
        if let Some(color) = color {
            let color = color.trim();
            category.color = (!color.is_empty()).then(|| color.to_string());
        }

        category.updated_at = chrono::Utc::now();
        category
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_update(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &before,
            &category,
        )?;

        Ok(category)
    }

    pub fn set_hidden(&self, id: CategoryId, hidden: bool) -> ExpenseResult<Category> {
        let mut category = self.load(id)?;
        if category.hidden == hidden {
            return Ok(category);
        }

        let before = category.clone();
        category.set_hidden(hidden);

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_update(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &before,
            &category,
        )?;

        Ok(category)
    }

    /// Delete a category
    ///
    /// Refused while expenses or schedules reference the category unless
    /// `force` is set, in which case they are deleted too. Budgets of the
    /// category are always removed and its credits become unassigned.
    pub fn delete(&self, id: CategoryId, force: bool) -> ExpenseResult<CategoryDeletion> {
        let category = self.load(id)?;

        let expenses = self.storage.expenses.get_by_category(id)?;
        let schedules = self.storage.recurring.get_by_category(id)?;
        if !force && (!expenses.is_empty() || !schedules.is_empty()) {
            return Err(ExpenseError::Validation(format!(
                "Cannot delete category '{}': it has {} expenses and {} recurring schedules. Use --force to delete them.",
                category.name,
                expenses.len(),
                schedules.len()
            )));
        }

        for expense in &expenses {
            self.storage.expenses.delete(expense.id)?;
            self.storage.log_delete(
                EntityType::Expense,
                expense.id.to_string(),
                Some(expense.description.clone()),
                expense,
            )?;
        }

        for schedule in &schedules {
            self.storage.recurring.delete(schedule.id)?;
            self.storage.log_delete(
                EntityType::RecurringExpense,
                schedule.id.to_string(),
                Some(schedule.description.clone()),
                schedule,
            )?;
        }

        let budgets = self.storage.budgets.delete_for_category(id)?;
        for budget in &budgets {
            self.storage.log_delete(
                EntityType::Budget,
                budget.id.to_string(),
                Some(format!("{} {}", category.name, budget.month)),
                budget,
            )?;
        }

        let credits = self.storage.credits.get_by_category(id)?;
        for credit in &credits {
            let mut unassigned = credit.clone();
            unassigned.assign(None);
            self.storage.credits.upsert(unassigned.clone())?;
            self.storage.log_update(
                EntityType::Credit,
                credit.id.to_string(),
                Some(credit.source.clone()),
                credit,
                &unassigned,
            )?;
        }

        self.storage.categories.delete(id)?;
        self.storage.save_all()?;

        self.storage.log_delete(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        debug!(
            category = %category.name,
            budgets = budgets.len(),
            credits = credits.len(),
            expenses = expenses.len(),
            "deleted category"
        );

        Ok(CategoryDeletion {
            category,
            budgets_removed: budgets.len(),
            credits_unassigned: credits.len(),
            expenses_deleted: expenses.len(),
            schedules_deleted: schedules.len(),
        })
    }

    fn load(&self, id: CategoryId) -> ExpenseResult<Category> {
        self.storage
            .categories
            .get(id)?
            .ok_or_else(|| ExpenseError::category_not_found(id.to_string()))
    }

    fn ensure_unique_name(&self, name: &str, except: Option<CategoryId>) -> ExpenseResult<()> {
        match self.storage.categories.get_by_name(name)? {
            Some(existing) if Some(existing.id) != except => Err(ExpenseError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::{Budget, Credit, Expense, Money, Month};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, Storage::open(paths).unwrap())
    }

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    #[test]
    fn test_create_and_find() {
        let (_temp, storage) = storage();
        let service = CategoryService::new(&storage);

        let created = service.create("Groceries", Some("🛒"), None).unwrap();
        assert_eq!(created.label(), "🛒 Groceries");

        assert_eq!(service.find("groceries").unwrap().unwrap().id, created.id);
        assert_eq!(service.find(&created.id.short()).unwrap().unwrap().id, created.id);
        assert!(service.find("Travel").unwrap().is_none());
        assert!(service.require("Travel").unwrap_err().is_not_found());
    }

    #[test]
    fn test_duplicate_and_empty_names_rejected() {
        let (_temp, storage) = storage();
        let service = CategoryService::new(&storage);
        service.create("Rent", None, None).unwrap();

        assert!(matches!(
            service.create("RENT", None, None),
            Err(ExpenseError::Duplicate { .. })
        ));
        assert!(service.create("   ", None, None).unwrap_err().is_validation());
    }

    #[test]
    fn test_update_and_hide() {
        let (_temp, storage) = storage();
        let service = CategoryService::new(&storage);
        let dining = service.create("Dining", Some("🍽️"), None).unwrap();
        service.create("Health", None, None).unwrap();

        let renamed = service
            .update(dining.id, Some("Eating Out"), Some(""), Some("orange"))
            .unwrap();
        assert_eq!(renamed.name, "Eating Out");
        assert!(renamed.icon.is_none());
        assert_eq!(renamed.color.as_deref(), Some("orange"));

        assert!(service.update(dining.id, Some("health"), None, None).is_err());

        service.set_hidden(dining.id, true).unwrap();
        assert_eq!(service.list(false).unwrap().len(), 1);
        assert_eq!(service.list(true).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_refused_with_expenses_unless_forced() {
        let (_temp, storage) = storage();
        let service = CategoryService::new(&storage);
        let cat = service.create("Transport", None, None).unwrap();

        storage
            .expenses
            .upsert(Expense::new(cat.id, Money::from_units(20), jan(3)))
            .unwrap();

        assert!(service.delete(cat.id, false).unwrap_err().is_validation());

        let result = service.delete(cat.id, true).unwrap();
        assert_eq!(result.expenses_deleted, 1);
        assert_eq!(storage.expenses.count().unwrap(), 0);
        assert!(storage.categories.get(cat.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_removes_budgets_and_unassigns_credits() {
        let (_temp, storage) = storage();
        let service = CategoryService::new(&storage);
        let cat = service.create("Utilities", None, None).unwrap();
        let month = Month::new(2025, 1).unwrap();

        storage
            .budgets
            .upsert(Budget::new(cat.id, month, Money::from_units(150)))
            .unwrap();
        let mut rebate = Credit::new(Money::from_units(10), jan(9), "Rebate");
        rebate.assign(Some(cat.id));
        let rebate_id = rebate.id;
        storage.credits.upsert(rebate).unwrap();

        let result = service.delete(cat.id, false).unwrap();
        assert_eq!(result.budgets_removed, 1);
        assert_eq!(result.credits_unassigned, 1);

        assert_eq!(storage.budgets.count().unwrap(), 0);
        assert!(storage.credits.get(rebate_id).unwrap().unwrap().is_unassigned());
    }
}
