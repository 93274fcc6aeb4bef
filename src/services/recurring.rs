//! Recurring expense schedules
//!
//! `process_due` plays the part of a scheduler: it inserts one expense per
//! occurrence that has come due and advances the schedule's counter.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, info, warn};

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{CategoryId, Expense, Money, RecurringExpense, RecurringId};
use crate::storage::Storage;

pub struct RecurringService<'a> {
    storage: &'a Storage,
}

#[derive(Debug, Clone)]
pub struct CreateRecurringInput {
    pub category_id: CategoryId,
    pub amount: Money,
    pub description: Option<String>,
    pub day_of_month: u32,
    pub time_of_day: NaiveTime,
    pub start_date: NaiveDate,
    pub total_occurrences: u32,
}

/// Fields to change on a schedule; already-created expenses are not touched
#[derive(Debug, Clone, Default)]
pub struct UpdateRecurringInput {
    pub category_id: Option<CategoryId>,
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub time_of_day: Option<NaiveTime>,
    pub total_occurrences: Option<u32>,
}

/// A future occurrence of a schedule
#[derive(Debug, Clone)]
pub struct UpcomingOccurrence {
    pub schedule: RecurringExpense,
    pub due: NaiveDateTime,
    /// 1-based position within the schedule
    pub number: u32,
}

impl<'a> RecurringService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: CreateRecurringInput) -> ExpenseResult<RecurringExpense> {
        self.ensure_category(input.category_id)?;

        let mut schedule = RecurringExpense::new(
            input.category_id,
            input.amount,
            input.day_of_month,
            input.time_of_day,
            input.start_date,
            input.total_occurrences,
        );
        if let Some(description) = input.description {
            schedule.description = description.trim().to_string();
        }

        schedule
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.recurring.upsert(schedule.clone())?;
        self.storage.recurring.save()?;

        self.storage.log_create(
            EntityType::RecurringExpense,
            schedule.id.to_string(),
            Some(schedule.description.clone()),
            &schedule,
        )?;

        info!(id = %schedule.id, first = ?schedule.next_occurrence(), "created recurring schedule");
        Ok(schedule)
    }

    pub fn get(&self, id: RecurringId) -> ExpenseResult<Option<RecurringExpense>> {
        self.storage.recurring.get(id)
    }

    /// Find by full or short id
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<RecurringExpense>> {
        if let Ok(id) = identifier.parse::<RecurringId>() {
            return self.storage.recurring.get(id);
        }

        Ok(self
            .storage
            .recurring
            .get_all()?
            .into_iter()
            .find(|r| r.id.matches(identifier)))
    }

    pub fn list(&self, active_only: bool) -> ExpenseResult<Vec<RecurringExpense>> {
        if active_only {
            self.storage.recurring.get_active()
        } else {
            self.storage.recurring.get_all()
        }
    }

    pub fn pause(&self, id: RecurringId) -> ExpenseResult<RecurringExpense> {
        self.set_active(id, false)
    }

    pub fn resume(&self, id: RecurringId) -> ExpenseResult<RecurringExpense> {
        self.set_active(id, true)
    }

    pub fn update(&self, id: RecurringId, input: UpdateRecurringInput) -> ExpenseResult<RecurringExpense> {
        let mut schedule = self.load(id)?;
        let before = schedule.clone();

        if let Some(category_id) = input.category_id {
            self.ensure_category(category_id)?;
            schedule.category_id = category_id;
        }
        if let Some(amount) = input.amount {
            schedule.amount = amount;
        }
        if let Some(description) = input.description {
            schedule.description = description.trim().to_string();
        }
        if let Some(time) = input.time_of_day {
            schedule.time_of_day = time;
        }
        if let Some(total) = input.total_occurrences {
            schedule.total_occurrences = total;
        }

        schedule.updated_at = chrono::Utc::now();
        schedule
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.save_update(&before, &schedule)?;
        Ok(schedule)
    }

    /// Delete a schedule; expenses it already created stay but lose the link
    pub fn delete(&self, id: RecurringId) -> ExpenseResult<RecurringExpense> {
        let schedule = self.load(id)?;

        for mut expense in self.storage.expenses.get_by_recurring(id)? {
            expense.recurring_id = None;
            expense.touch();
            self.storage.expenses.upsert(expense)?;
        }
        self.storage.recurring.delete(id)?;

        self.storage.expenses.save()?;
        self.storage.recurring.save()?;

        self.storage.log_delete(
            EntityType::RecurringExpense,
            schedule.id.to_string(),
            Some(schedule.description.clone()),
            &schedule,
        )?;

        Ok(schedule)
    }

    /// Create every expense that has come due at `now`
    ///
    /// Catches up on missed months, never creates more than a schedule's
    /// total, and is safe to call repeatedly.
    pub fn process_due(&self, now: NaiveDateTime) -> ExpenseResult<Vec<Expense>> {
        let mut created = Vec::new();

        for mut schedule in self.storage.recurring.get_active()? {
            if !schedule.is_due(now) {
                continue;
            }
            if self.storage.categories.get(schedule.category_id)?.is_none() {
                warn!(id = %schedule.id, "skipping schedule whose category no longer exists");
                continue;
            }

            let before = schedule.clone();
            while let Some(due) = schedule.next_occurrence().filter(|due| *due <= now) {
                let mut expense = Expense::with_description(
                    schedule.category_id,
                    schedule.amount,
                    due.date(),
                    schedule.description.clone(),
                );
                expense.recurring_id = Some(schedule.id);

                self.storage.expenses.upsert(expense.clone())?;
                self.storage.log_create(
                    EntityType::Expense,
                    expense.id.to_string(),
                    Some(expense.description.clone()),
                    &expense,
                )?;

                schedule.mark_created();
                created.push(expense);
            }

            self.storage.recurring.upsert(schedule.clone())?;
            self.storage.log_update(
                EntityType::RecurringExpense,
                schedule.id.to_string(),
                Some(schedule.description.clone()),
                &before,
                &schedule,
            )?;
            debug!(
                id = %schedule.id,
                created = schedule.occurrences_created - before.occurrences_created,
                "processed schedule"
            );
        }

        if !created.is_empty() {
            self.storage.expenses.save()?;
            self.storage.recurring.save()?;
            info!(count = created.len(), "created recurring expenses");
        }

        Ok(created)
    }

    /// The next `limit` occurrences after `now` across active schedules, soonest first
    pub fn upcoming(&self, now: NaiveDateTime, limit: usize) -> ExpenseResult<Vec<UpcomingOccurrence>> {
        let mut upcoming: Vec<UpcomingOccurrence> = Vec::new();

        for schedule in self.storage.recurring.get_active()? {
            let pending = schedule
                .pending_occurrences()
                .filter(|(_, due)| *due > now)
                .take(limit);
            for (index, due) in pending {
                upcoming.push(UpcomingOccurrence {
                    schedule: schedule.clone(),
                    due,
                    number: index + 1,
                });
            }
        }

        upcoming.sort_by_key(|o| o.due);
        upcoming.truncate(limit);
        Ok(upcoming)
    }

    fn set_active(&self, id: RecurringId, active: bool) -> ExpenseResult<RecurringExpense> {
        let mut schedule = self.load(id)?;
        if schedule.active == active {
            return Ok(schedule);
        }
        if active && schedule.is_exhausted() {
            return Err(ExpenseError::Recurring(format!(
                "Schedule {} has created all {} occurrences",
                schedule.id, schedule.total_occurrences
            )));
        }

        let before = schedule.clone();
        schedule.set_active(active);
        self.save_update(&before, &schedule)?;
        Ok(schedule)
    }

    fn save_update(&self, before: &RecurringExpense, after: &RecurringExpense) -> ExpenseResult<()> {
        self.storage.recurring.upsert(after.clone())?;
        self.storage.recurring.save()?;

        self.storage.log_update(
            EntityType::RecurringExpense,
            after.id.to_string(),
            Some(after.description.clone()),
            before,
            after,
        )
    }

    fn load(&self, id: RecurringId) -> ExpenseResult<RecurringExpense> {
        self.storage
            .recurring
            .get(id)?
            .ok_or_else(|| ExpenseError::recurring_not_found(id.to_string()))
    }

    fn ensure_category(&self, id: CategoryId) -> ExpenseResult<()> {
        match self.storage.categories.get(id)? {
            Some(_) => Ok(()),
            None => Err(ExpenseError::category_not_found(id.to_string())),
        }
    }
}
