//! Recurring expense schedule model
//!
//! A schedule inserts one expense per month on a given day and time, for a
//! bounded number of occurrences. Days past the end of a short month clamp to
//! that month's last day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::MAX_DESCRIPTION_LEN;
use super::ids::{CategoryId, RecurringId};
use super::money::Money;
use super::month::Month;

/// Upper bound on `total_occurrences`, one hundred years of monthly expenses
pub const MAX_OCCURRENCES: u32 = 1200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: RecurringId,

    pub category_id: CategoryId,

    /// Amount of each generated expense
    pub amount: Money,

    #[serde(default)]
    pub description: String,

    /// Day of the month (1-31) the expense is due
    pub day_of_month: u32,

    /// Time of day the expense becomes due
    pub time_of_day: NaiveTime,

    /// No occurrence falls before this date
    pub start_date: NaiveDate,

    /// Number of expenses this schedule creates in total
    pub total_occurrences: u32,

    /// Number of expenses created so far
    #[serde(default)]
    pub occurrences_created: u32,

    /// Paused schedules create nothing
    #[serde(default = "default_active")]
    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl RecurringExpense {
    pub fn new(
        category_id: CategoryId,
        amount: Money,
        day_of_month: u32,
        time_of_day: NaiveTime,
        start_date: NaiveDate,
        total_occurrences: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecurringId::new(),
            category_id,
            amount,
            description: String::new(),
            day_of_month,
            time_of_day,
            start_date,
            total_occurrences,
            occurrences_created: 0,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Month of the first occurrence
    ///
    /// The start month if its slot is on or after `start_date`, otherwise the
    /// month after.
    pub fn first_month(&self) -> Month {
        let start_month = Month::of(self.start_date);
        if start_month.clamped_day(self.day_of_month) >= self.start_date {
            start_month
        } else {
            start_month.next()
        }
    }

    /// Due date and time of occurrence `index` (0-based)
    pub fn occurrence(&self, index: u32) -> NaiveDateTime {
        let month = self
            .first_month()
            .offset(i32::try_from(index).unwrap_or(i32::MAX));
        month
            .clamped_day(self.day_of_month)
            .and_time(self.time_of_day)
    }

    /// Next occurrence to be created, `None` once exhausted
    pub fn next_occurrence(&self) -> Option<NaiveDateTime> {
        if self.is_exhausted() {
            None
        } else {
            Some(self.occurrence(self.occurrences_created))
        }
    }

    /// Due date and time of the last occurrence
    pub fn final_occurrence(&self) -> Option<NaiveDateTime> {
        self.total_occurrences
            .checked_sub(1)
            .map(|last| self.occurrence(last))
    }

    /// Occurrences not created yet, as (index, due) pairs in schedule order
    pub fn pending_occurrences(&self) -> impl Iterator<Item = (u32, NaiveDateTime)> + '_ {
        (self.occurrences_created..self.total_occurrences).map(|index| (index, self.occurrence(index)))
    }

    pub fn remaining_occurrences(&self) -> u32 {
        self.total_occurrences.saturating_sub(self.occurrences_created)
    }

    pub fn is_exhausted(&self) -> bool {
        self.occurrences_created >= self.total_occurrences
    }

    /// Whether the next occurrence is due at `now`
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.active && self.next_occurrence().is_some_and(|next| next <= now)
    }

    /// Record that the next occurrence has been created
    pub fn mark_created(&mut self) {
        self.occurrences_created += 1;
        self.updated_at = Utc::now();
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), RecurringValidationError> {
        if !self.amount.is_positive() {
            return Err(RecurringValidationError::NonPositiveAmount);
        }
        if self.amount.exceeds_limit() {
            return Err(RecurringValidationError::AmountTooLarge);
        }
        if !(1..=31).contains(&self.day_of_month) {
            return Err(RecurringValidationError::InvalidDay(self.day_of_month));
        }
        if self.total_occurrences == 0 {
            return Err(RecurringValidationError::NoOccurrences);
        }
        if self.total_occurrences > MAX_OCCURRENCES {
            return Err(RecurringValidationError::TooManyOccurrences(self.total_occurrences));
        }
        if self.occurrences_created > self.total_occurrences {
            return Err(RecurringValidationError::TotalBelowCreated {
                total: self.total_occurrences,
                created: self.occurrences_created,
            });
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(RecurringValidationError::DescriptionTooLong);
        }
        Ok(())
    }
}

impl fmt::Display for RecurringExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on day {} at {} ({}/{} created)",
            self.amount,
            self.day_of_month,
            self.time_of_day.format("%H:%M"),
            self.occurrences_created,
            self.total_occurrences
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurringValidationError {
    NonPositiveAmount,
    AmountTooLarge,
    InvalidDay(u32),
    NoOccurrences,
    TooManyOccurrences(u32),
    TotalBelowCreated { total: u32, created: u32 },
    DescriptionTooLong,
}

impl fmt::Display for RecurringValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Recurring amount must be greater than zero"),
            Self::AmountTooLarge => {
                write!(f, "Recurring amount must be at most {}", Money::MAX_AMOUNT)
            }
            Self::InvalidDay(day) => write!(f, "Day of month must be 1-31, got {}", day),
            Self::NoOccurrences => write!(f, "A schedule needs at least one occurrence"),
            Self::TooManyOccurrences(total) => write!(
                f,
                "A schedule can have at most {} occurrences, got {}",
                MAX_OCCURRENCES, total
            ),
            Self::TotalBelowCreated { total, created } => write!(
                f,
                "Total occurrences ({}) is below the {} already created",
                total, created
            ),
            Self::DescriptionTooLong => write!(
                f,
                "Description must be at most {} characters",
                MAX_DESCRIPTION_LEN
            ),
        }
    }
}

impl std::error::Error for RecurringValidationError {}
