//! Strongly-typed ID wrappers
//!
//! Each table gets its own uuid newtype so an expense id can never be passed
//! where a credit id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short form shown in tables: prefix plus the first 8 hex digits
            pub fn short(&self) -> String {
                format!("{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }

            /// True when `s` is this id's short form or full uuid
            pub fn matches(&self, s: &str) -> bool {
                let s = s.trim();
                s == self.short() || s == self.0.to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.short())
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            /// Parses a full uuid, with or without the display prefix
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(CategoryId, "cat-");
define_id!(ExpenseId, "exp-");
define_id!(CreditId, "crd-");
define_id!(BudgetId, "bud-");
define_id!(RecurringId, "rec-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_short_form() {
        let id = ExpenseId::new();
        let display = id.to_string();
        assert!(display.starts_with("exp-"));
        assert_eq!(display.len(), 12);
        assert!(id.matches(&display));
        assert!(id.matches(&id.as_uuid().to_string()));
    }

    #[test]
    fn test_parse_full_and_prefixed() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: CreditId = uuid_str.parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);

        let prefixed: CreditId = format!("crd-{}", uuid_str).parse().unwrap();
        assert_eq!(id, prefixed);

        assert!("crd-550e8400".parse::<CreditId>().is_err());
    }

    #[test]
    fn test_serialization() {
        let id = RecurringId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: RecurringId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
