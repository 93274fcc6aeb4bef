//! Spending category model
//!
//! Expenses, budgets and (optionally) credits belong to a category. A category
//! carries a display icon (usually an emoji) and an optional color used by the
//! dashboard chart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Default categories created by `init`: (name, icon)
pub const DEFAULT_CATEGORIES: [(&str, &str); 8] = [
    ("Groceries", "🛒"),
    ("Rent", "🏠"),
    ("Utilities", "💡"),
    ("Transport", "🚗"),
    ("Dining", "🍽️"),
    ("Entertainment", "🎬"),
    ("Health", "💊"),
    ("Shopping", "🛍️"),
];

const MAX_NAME_LEN: usize = 50;
const MAX_ICON_CHARS: usize = 8;

/// A spending category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    pub name: String,

    /// Emoji or short text shown before the name
    #[serde(default)]
    pub icon: Option<String>,

    /// Color name or hex code
    #[serde(default)]
    pub color: Option<String>,

    /// Hidden categories are left out of lists and summaries unless they have activity
    #[serde(default)]
    pub hidden: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            icon: None,
            color: None,
            hidden: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_icon(name: impl Into<String>, icon: impl Into<String>) -> Self {
        let mut category = Self::new(name);
        category.icon = Some(icon.into());
        category
    }

    /// Name prefixed with the icon, if any
    pub fn label(&self) -> String {
        match &self.icon {
            Some(icon) if !icon.is_empty() => format!("{} {}", icon, self.name),
            _ => self.name.clone(),
        }
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(name.chars().count()));
        }
        if let Some(icon) = &self.icon {
            if icon.chars().count() > MAX_ICON_CHARS {
                return Err(CategoryValidationError::IconTooLong);
            }
        }
        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    IconTooLong,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} characters, max {})",
                len, MAX_NAME_LEN
            ),
            Self::IconTooLong => write!(f, "Category icon must be at most {} characters", MAX_ICON_CHARS),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
