//! Calendar month buckets
//!
//! Budgets, credits and expenses are all grouped by calendar month. `Month`
//! carries the arithmetic for stepping across year boundaries.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Earliest year a `Month` can hold
pub const MIN_YEAR: i32 = 1;

/// Latest year a `Month` can hold
pub const MAX_YEAR: i32 = 9999;

const MIN_INDEX: i64 = MIN_YEAR as i64 * 12;
const MAX_INDEX: i64 = MAX_YEAR as i64 * 12 + 11;

/// A calendar month, e.g. 2025-01
///
/// Serialized as the string "YYYY-MM". Years are limited to
/// `MIN_YEAR..=MAX_YEAR`; arithmetic saturates at those bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month, rejecting month numbers outside 1-12 and out-of-range years
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(MonthParseError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`, clamped to the supported years
    pub fn of(date: NaiveDate) -> Self {
        Self::from_index(date.year() as i64 * 12 + date.month0() as i64)
    }

    /// The current month in local time
    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    /// All twelve months of a year, January first
    pub fn year_months(year: i32) -> impl Iterator<Item = Month> {
        let year = year.clamp(MIN_YEAR, MAX_YEAR);
        (1..=12).map(move |month| Month { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.clamped_day(1)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.clamped_day(31)
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            2 if is_leap_year(self.year) => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// The given day of this month, clamped to the month's last day
    pub fn clamped_day(&self, day: u32) -> NaiveDate {
        let day = day.clamp(1, self.days_in_month());
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or(NaiveDate::MIN)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn prev(&self) -> Self {
        self.offset(-1)
    }

    /// Move `n` months forward (or backward when negative)
    ///
    /// Stops at 0001-01 and 9999-12 rather than leaving the supported range.
    pub fn offset(&self, n: i32) -> Self {
        Self::from_index(self.index() as i64 + n as i64)
    }

    /// Number of months from `self` to `other` (negative if `other` is earlier)
    pub fn months_until(&self, other: Month) -> i32 {
        other.index() - self.index()
    }

    /// Inclusive range of months from `self` to `end`
    pub fn range_to(&self, end: Month) -> Vec<Month> {
        let count = self.months_until(end);
        if count < 0 {
            return Vec::new();
        }
        (0..=count).map(|n| self.offset(n)).collect()
    }

    /// Long name, e.g. "January 2025"
    pub fn name(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }

    /// Abbreviated label for charts, e.g. "Jan 25"
    pub fn short_name(&self) -> String {
        format!(
            "{} {:02}",
            &MONTH_NAMES[(self.month - 1) as usize][..3],
            self.year.rem_euclid(100)
        )
    }

    /// Parse "YYYY-MM", "current", "last" or "next"
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "current" | "this" | "now" => return Ok(Self::current()),
            "last" | "prev" | "previous" => return Ok(Self::current().prev()),
            "next" => return Ok(Self::current().next()),
            _ => {}
        }

        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }

    fn index(&self) -> i32 {
        self.year * 12 + self.month as i32 - 1
    }

    fn from_index(index: i64) -> Self {
        let index = index.clamp(MIN_INDEX, MAX_INDEX);
        Self {
            year: index.div_euclid(12) as i32,
            month: (index.rem_euclid(12) + 1) as u32,
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:04}-{:02}", self.year, self.month))
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

impl TryFrom<String> for Month {
    type Error = MonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Month::parse(&value)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidYear(i32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => {
                write!(f, "Invalid month '{}', expected YYYY-MM", s)
            }
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month number: {}", m),
            MonthParseError::InvalidYear(y) => {
                write!(f, "Year {} is outside {}-{}", y, MIN_YEAR, MAX_YEAR)
            }
        }
    }
}

impl std::error::Error for MonthParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, month: u32) -> Month {
        Month::new(year, month).unwrap()
    }

    #[test]
    fn test_bounds() {
        let feb = month(2024, 2);
        assert_eq!(feb.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(month(2025, 2).days_in_month(), 28);
        assert_eq!(month(2025, 12).days_in_month(), 31);
    }

    #[test]
    fn test_navigation_across_years() {
        assert_eq!(month(2024, 12).next(), month(2025, 1));
        assert_eq!(month(2025, 1).prev(), month(2024, 12));
        assert_eq!(month(2025, 3).offset(-15), month(2023, 12));
        assert_eq!(month(2025, 11).offset(14), month(2027, 1));
    }

    #[test]
    fn test_months_until_and_range() {
        let start = month(2024, 11);
        let end = month(2025, 2);
        assert_eq!(start.months_until(end), 3);
        assert_eq!(end.months_until(start), -3);
        assert_eq!(
            start.range_to(end),
            vec![month(2024, 11), month(2024, 12), month(2025, 1), month(2025, 2)]
        );
        assert!(end.range_to(start).is_empty());
    }

    #[test]
    fn test_clamped_day() {
        assert_eq!(
            month(2025, 4).clamped_day(31),
            NaiveDate::from_ymd_opt(2025, 4, 30).unwrap()
        );
        assert_eq!(
            month(2025, 2).clamped_day(30),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert_eq!(
            month(2025, 1).clamped_day(15),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(Month::parse("2025-01").unwrap(), month(2025, 1));
        assert_eq!(Month::parse("2025-1").unwrap(), month(2025, 1));
        assert_eq!(
            Month::parse("2025-13"),
            Err(MonthParseError::InvalidMonth(13))
        );
        assert!(Month::parse("January").is_err());
        assert_eq!(Month::parse("last").unwrap(), Month::current().prev());
        assert_eq!(month(2025, 3).to_string(), "2025-03");
        assert_eq!(month(2025, 3).name(), "March 2025");
        assert_eq!(month(2025, 3).short_name(), "Mar 25");
    }

    #[test]
    fn test_year_months_and_ordering() {
        let months: Vec<_> = Month::year_months(2025).collect();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], month(2025, 1));
        assert_eq!(months[11], month(2025, 12));
        assert!(month(2024, 12) < month(2025, 1));
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&month(2025, 7)).unwrap();
        assert_eq!(json, "\"2025-07\"");
        let back: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month(2025, 7));
        assert!(serde_json::from_str::<Month>("\"2025-00\"").is_err());
    }

    #[test]
    fn test_out_of_range_years_rejected() {
        assert_eq!(
            Month::parse("300000-01"),
            Err(MonthParseError::InvalidYear(300000))
        );
        assert_eq!(Month::new(0, 1), Err(MonthParseError::InvalidYear(0)));
        assert!(serde_json::from_str::<Month>("\"10000-01\"").is_err());
    }

    #[test]
    fn test_arithmetic_stops_at_range_edges() {
        let last = month(MAX_YEAR, 12);
        assert_eq!(last.next(), last);
        assert_eq!(last.last_day(), NaiveDate::from_ymd_opt(9999, 12, 31).unwrap());
        assert_eq!(month(MIN_YEAR, 1).offset(i32::MIN), month(MIN_YEAR, 1));
        assert_eq!(month(2025, 1).offset(i32::MAX), last);

        let far = NaiveDate::from_ymd_opt(20000, 6, 1).unwrap();
        assert_eq!(Month::of(far), last);
        assert_eq!(Month::year_months(300000).next(), Some(month(MAX_YEAR, 1)));
    }

    #[test]
    fn test_contains() {
        let jan = month(2025, 1);
        assert!(jan.contains(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()));
        assert!(!jan.contains(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
    }
}
