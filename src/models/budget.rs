//! Monthly category budget model
//!
//! A budget is the spending allowance for one category in one month. The
//! `carryover` field is kept for file compatibility but carryover is disabled:
//! it is always zero, whatever a stored file contains.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;
use super::month::Month;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub category_id: CategoryId,

    pub month: Month,

    /// Allowance for the month
    pub amount: Money,

    /// Always zero
    #[serde(default, deserialize_with = "zero_carryover")]
    pub carryover: Money,

    #[serde(default)]
    pub notes: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn zero_carryover<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    Money::deserialize(deserializer)?;
    Ok(Money::zero())
}

impl Budget {
    pub fn new(category_id: CategoryId, month: Month, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            category_id,
            month,
            amount,
            carryover: Money::zero(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.carryover = Money::zero();
        self.updated_at = Utc::now();
    }

    /// Amount available before credits and spending: the allowance plus carryover
    pub fn total_available(&self) -> Money {
        self.amount + self.carryover
    }

    /// Zero and positive allowances are accepted, negative ones are not
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.amount.is_negative() {
            return Err(BudgetValidationError::NegativeAmount);
        }
        if self.amount.exceeds_limit() {
            return Err(BudgetValidationError::AmountTooLarge);
        }
        if !self.carryover.is_zero() {
            return Err(BudgetValidationError::CarryoverNotSupported);
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} budget: {}", self.month, self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeAmount,
    AmountTooLarge,
    CarryoverNotSupported,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Budget amount cannot be negative"),
            Self::AmountTooLarge => {
                write!(f, "Budget amount must be at most {}", Money::MAX_AMOUNT)
            }
            Self::CarryoverNotSupported => write!(f, "Budget carryover is disabled"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan() -> Month {
        Month::new(2025, 1).unwrap()
    }

    #[test]
    fn test_new_budget_has_zero_carryover() {
        let budget = Budget::new(CategoryId::new(), jan(), Money::from_cents(40000));
        assert_eq!(budget.carryover, Money::zero());
        assert_eq!(budget.total_available().cents(), 40000);
        assert_eq!(budget.to_string(), "2025-01 budget: $400.00");
    }

    #[test]
    fn test_validation() {
        let mut budget = Budget::new(CategoryId::new(), jan(), Money::zero());
        assert!(budget.validate().is_ok());

        budget.set_amount(Money::from_cents(-1));
        assert_eq!(budget.validate(), Err(BudgetValidationError::NegativeAmount));

        budget.set_amount(Money::from_cents(Money::MAX_AMOUNT.cents() + 1));
        assert_eq!(budget.validate(), Err(BudgetValidationError::AmountTooLarge));

        budget.set_amount(Money::from_cents(100));
        budget.carryover = Money::from_cents(50);
        assert_eq!(
            budget.validate(),
            Err(BudgetValidationError::CarryoverNotSupported)
        );
    }

    #[test]
    fn test_stored_carryover_is_ignored() {
        let budget = Budget::new(CategoryId::new(), jan(), Money::from_cents(1000));
        let mut value = serde_json::to_value(&budget).unwrap();
        value["carryover"] = serde_json::json!(2500);

        let loaded: Budget = serde_json::from_value(value).unwrap();
        assert_eq!(loaded.carryover, Money::zero());
        assert_eq!(loaded.total_available().cents(), 1000);
    }

    #[test]
    fn test_missing_carryover_defaults_to_zero() {
        let budget = Budget::new(CategoryId::new(), jan(), Money::from_cents(1000));
        let mut value = serde_json::to_value(&budget).unwrap();
        value.as_object_mut().unwrap().remove("carryover");

        let loaded: Budget = serde_json::from_value(value).unwrap();
        assert_eq!(loaded.carryover, Money::zero());
        assert_eq!(loaded.month, jan());
    }
}
