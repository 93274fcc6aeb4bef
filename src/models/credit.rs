//! Credit (income) model
//!
//! A credit is money coming in. It may be assigned to a category, in which case
//! it tops up that category's budget for the month; otherwise it counts as
//! unassigned income for its month.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, CreditId};
use super::money::Money;
use super::month::Month;

const MAX_SOURCE_LEN: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credit {
    pub id: CreditId,

    /// Amount received, always positive
    pub amount: Money,

    pub date: NaiveDate,

    /// Where the money came from ("Salary", "Refund", ...)
    pub source: String,

    /// Category this credit is assigned to, `None` when unassigned
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Marks a salary payment for salary month tracking
    #[serde(default)]
    pub is_salary: bool,

    #[serde(default)]
    pub notes: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credit {
    pub fn new(amount: Money, date: NaiveDate, source: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CreditId::new(),
            amount,
            date,
            source: source.into(),
            category_id: None,
            is_salary: false,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn salary(amount: Money, date: NaiveDate) -> Self {
        let mut credit = Self::new(amount, date, "Salary");
        credit.is_salary = true;
        credit
    }

    pub fn month(&self) -> Month {
        Month::of(self.date)
    }

    pub fn is_unassigned(&self) -> bool {
        self.category_id.is_none()
    }

    /// Assign to a category, or unassign with `None`
    pub fn assign(&mut self, category_id: Option<CategoryId>) {
        self.category_id = category_id;
        self.updated_at = Utc::now();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), CreditValidationError> {
        if !self.amount.is_positive() {
            return Err(CreditValidationError::NonPositiveAmount);
        }
        if self.amount.exceeds_limit() {
            return Err(CreditValidationError::AmountTooLarge);
        }
        let source = self.source.trim();
        if source.is_empty() {
            return Err(CreditValidationError::EmptySource);
        }
        if source.chars().count() > MAX_SOURCE_LEN {
            return Err(CreditValidationError::SourceTooLong);
        }
        Ok(())
    }
}

impl fmt::Display for Credit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} from {}", self.date, self.amount, self.source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditValidationError {
    NonPositiveAmount,
    AmountTooLarge,
    EmptySource,
    SourceTooLong,
}

impl fmt::Display for CreditValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Credit amount must be greater than zero"),
            Self::AmountTooLarge => {
                write!(f, "Credit amount must be at most {}", Money::MAX_AMOUNT)
            }
            Self::EmptySource => write!(f, "Credit source cannot be empty"),
            Self::SourceTooLong => {
                write!(f, "Credit source must be at most {} characters", MAX_SOURCE_LEN)
            }
        }
    }
}

impl std::error::Error for CreditValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_credit_is_unassigned() {
        let credit = Credit::new(Money::from_cents(2000), date(2025, 2, 3), "Refund");
        assert!(credit.is_unassigned());
        assert!(!credit.is_salary);
        assert_eq!(credit.month(), Month::new(2025, 2).unwrap());
        assert_eq!(credit.to_string(), "2025-02-03 $20.00 from Refund");
    }

    #[test]
    fn test_assign_and_unassign() {
        let mut credit = Credit::new(Money::from_cents(2000), date(2025, 2, 3), "Refund");
        let category_id = CategoryId::new();

        credit.assign(Some(category_id));
        assert_eq!(credit.category_id, Some(category_id));
        assert!(!credit.is_unassigned());

        credit.assign(None);
        assert!(credit.is_unassigned());
    }

    #[test]
    fn test_salary_constructor() {
        let credit = Credit::salary(Money::from_cents(350000), date(2025, 1, 25));
        assert!(credit.is_salary);
        assert_eq!(credit.source, "Salary");
    }

    #[test]
    fn test_validation() {
        let zero = Credit::new(Money::zero(), date(2025, 1, 1), "Gift");
        assert_eq!(zero.validate(), Err(CreditValidationError::NonPositiveAmount));

        let blank = Credit::new(Money::from_cents(100), date(2025, 1, 1), "  ");
        assert_eq!(blank.validate(), Err(CreditValidationError::EmptySource));

        let huge = Credit::new(Money::from_units(2_000_000_000), date(2025, 1, 1), "Gift");
        assert_eq!(huge.validate(), Err(CreditValidationError::AmountTooLarge));

        let ok = Credit::new(Money::from_cents(100), date(2025, 1, 1), "Gift");
        assert!(ok.validate().is_ok());
    }
}
