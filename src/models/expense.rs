//! Expense model
//!
//! An expense is money spent in a category on a date. Expenses created by a
//! recurring schedule keep a link back to it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId, RecurringId};
use super::money::Money;
use super::month::Month;

pub(crate) const MAX_DESCRIPTION_LEN: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    pub category_id: CategoryId,

    /// Amount spent, always positive
    pub amount: Money,

    pub date: NaiveDate,

    #[serde(default)]
    pub description: String,

    /// Schedule that generated this expense
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_id: Option<RecurringId>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(category_id: CategoryId, amount: Money, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            category_id,
            amount,
            date,
            description: String::new(),
            recurring_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(
        category_id: CategoryId,
        amount: Money,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        let mut expense = Self::new(category_id, amount, date);
        expense.description = description.into();
        expense
    }

    pub fn month(&self) -> Month {
        Month::of(self.date)
    }

    pub fn is_recurring(&self) -> bool {
        self.recurring_id.is_some()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Reject non-positive amounts and oversized descriptions
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        if self.amount.exceeds_limit() {
            return Err(ExpenseValidationError::AmountTooLarge);
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ExpenseValidationError::DescriptionTooLong);
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.amount)?;
        if !self.description.is_empty() {
            write!(f, " {}", self.description)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount,
    AmountTooLarge,
    DescriptionTooLong,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Expense amount must be greater than zero"),
            Self::AmountTooLarge => {
                write!(f, "Expense amount must be at most {}", Money::MAX_AMOUNT)
            }
            Self::DescriptionTooLong => write!(
                f,
                "Description must be at most {} characters",
                MAX_DESCRIPTION_LEN
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
