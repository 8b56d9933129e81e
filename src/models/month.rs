//! Calendar month selection
//!
//! A `Month` is the `YYYY-MM` selection used to scope the transaction list,
//! the summaries and the charts. A date belongs to a month when its ISO
//! string starts with the month's `YYYY-MM` prefix.

use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar month (e.g., "2025-01")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    /// Always the first day of the month
    first: NaiveDate,
}

impl Month {
    /// Create a month, returning `None` for an out-of-range month or year
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// The current local month
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        self.first
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(self.first)
    }

    /// Number of days in the month
    pub fn num_days(&self) -> u32 {
        self.end_date().day()
    }

    /// Every date of the month in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_date();
        self.first.iter_days().take_while(move |d| *d <= end)
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The following month
    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    /// The preceding month
    pub fn prev(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    /// Parse a month from a string in `YYYY-MM` format
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();

        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }

        Self::new(year, month).ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))
    }
}

impl Default for Month {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:04}-{:02}", self.year(), self.month()))
    }
}

impl FromStr for Month {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => {
                write!(f, "Invalid month format: {} (use YYYY-MM)", s)
            }
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}
