//! Credit (income) service

use chrono::NaiveDate;
use tracing::info;

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{CategoryId, Credit, CreditId, Money, Month};
use crate::storage::Storage;

pub struct CreditService<'a> {
    storage: &'a Storage,
}

#[derive(Debug, Clone)]
pub struct CreateCreditInput {
    pub amount: Money,
    pub date: NaiveDate,
    pub source: String,
    pub category_id: Option<CategoryId>,
    pub is_salary: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCreditInput {
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub source: Option<String>,
    pub is_salary: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CreditFilter {
    pub month: Option<Month>,
    pub category_id: Option<CategoryId>,
    pub unassigned_only: bool,
    pub salary_only: bool,
}

impl CreditFilter {
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

    pub fn unassigned(mut self) -> Self {
        self.unassigned_only = true;
        self
    }

    pub fn salary(mut self) -> Self {
        self.salary_only = true;
        self
    }

    fn matches(&self, credit: &Credit) -> bool {
        self.month.map_or(true, |m| m.contains(credit.date))
            && self
                .category_id
                .map_or(true, |c| credit.category_id == Some(c))
            && (!self.unassigned_only || credit.is_unassigned())
            && (!self.salary_only || credit.is_salary)
    }
}

impl<'a> CreditService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: CreateCreditInput) -> ExpenseResult<Credit> {
        if let Some(category_id) = input.category_id {
            self.ensure_category(category_id)?;
        }

        let mut credit = Credit::new(input.amount, input.date, input.source.trim());
        credit.category_id = input.category_id;
        credit.is_salary = input.is_salary;
        credit.notes = input.notes.unwrap_or_default();

        credit
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.credits.upsert(credit.clone())?;
        self.storage.credits.save()?;

        self.storage.log_create(
            EntityType::Credit,
            credit.id.to_string(),
            Some(credit.source.clone()),
            &credit,
        )?;

        info!(amount = %credit.amount, source = %credit.source, "recorded credit");
        Ok(credit)
    }

    pub fn get(&self, id: CreditId) -> ExpenseResult<Option<Credit>> {
        self.storage.credits.get(id)
    }

    /// Find by full or short id
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Credit>> {
        if let Ok(id) = identifier.parse::<CreditId>() {
            return self.storage.credits.get(id);
        }

        Ok(self
            .storage
            .credits
            .get_all()?
            .into_iter()
            .find(|c| c.id.matches(identifier)))
    }

    /// Credits matching the filter, newest first
    pub fn list(&self, filter: CreditFilter) -> ExpenseResult<Vec<Credit>> {
        Ok(self
            .storage
            .credits
            .get_all()?
            .into_iter()
            .filter(|c| filter.matches(c))
            .collect())
    }

    /// Assign a credit to a category, or unassign it with `None`
    pub fn assign(&self, id: CreditId, category_id: Option<CategoryId>) -> ExpenseResult<Credit> {
        if let Some(category_id) = category_id {
            self.ensure_category(category_id)?;
        }

        let mut credit = self.load(id)?;
        let before = credit.clone();
        credit.assign(category_id);

        self.save_update(&before, &credit)?;
        Ok(credit)
    }

    pub fn update(&self, id: CreditId, input: UpdateCreditInput) -> ExpenseResult<Credit> {
        let mut credit = self.load(id)?;
        let before = credit.clone();

        if let Some(amount) = input.amount {
            credit.amount = amount;
        }
        if let Some(date) = input.date {
            credit.date = date;
        }
        if let Some(source) = input.source {
            credit.source = source.trim().to_string();
        }
        if let Some(is_salary) = input.is_salary {
            credit.is_salary = is_salary;
        }
        if let Some(notes) = input.notes {
            credit.notes = notes;
        }

        credit.touch();
        credit
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.save_update(&before, &credit)?;
        Ok(credit)
    }

    pub fn delete(&self, id: CreditId) -> ExpenseResult<Credit> {
        let credit = self.load(id)?;

        self.storage.credits.delete(id)?;
        self.storage.credits.save()?;

        self.storage.log_delete(
            EntityType::Credit,
            credit.id.to_string(),
            Some(credit.source.clone()),
            &credit,
        )?;

        Ok(credit)
    }

    /// All credits received in a month, assigned or not
    pub fn total_for_month(&self, month: Month) -> ExpenseResult<Money> {
        Ok(self
            .storage
            .credits
            .get_for_month(month)?
            .iter()
            .map(|c| c.amount)
            .sum())
    }

    fn save_update(&self, before: &Credit, after: &Credit) -> ExpenseResult<()> {
        self.storage.credits.upsert(after.clone())?;
        self.storage.credits.save()?;

        self.storage.log_update(
            EntityType::Credit,
            after.id.to_string(),
            Some(after.source.clone()),
            before,
            after,
        )
    }

    fn load(&self, id: CreditId) -> ExpenseResult<Credit> {
        self.storage
            .credits
            .get(id)?
            .ok_or_else(|| ExpenseError::credit_not_found(id.to_string()))
    }

    fn ensure_category(&self, id: CategoryId) -> ExpenseResult<()> {
        match self.storage.categories.get(id)? {
            Some(_) => Ok(()),
            None => Err(ExpenseError::category_not_found(id.to_string())),
        }
    }
}
