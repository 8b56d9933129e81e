//! Money type for representing yen amounts
//!
//! Amounts are whole yen stored as i64; the yen has no minor unit in
//! everyday use, so there is no fractional part to track.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount in whole yen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from whole yen
    ///
    /// # Examples
    /// ```
    /// use kakeibo::models::Money;
    /// let amount = Money::from_yen(1000);
    /// assert_eq!(amount.to_string(), "¥1,000");
    /// ```
    pub const fn from_yen(yen: i64) -> Self {
        Self(yen)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in yen
    pub const fn yen(&self) -> i64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "1000", "1,000", "¥1,000", "￥1000", "-500".
    /// Commas must separate groups of three digits.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };

        let rest = rest
            .strip_prefix('¥')
            .or_else(|| rest.strip_prefix('￥'))
            .unwrap_or(rest);

        if !is_grouped(rest) {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let digits: String = rest.chars().filter(|c| *c != ',').collect();

        let yen: i64 = digits
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -yen } else { yen }))
    }

    /// Format the amount with digit grouping and no symbol ("1,234,567")
    pub fn format_grouped(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

        if self.is_negative() {
            grouped.push('-');
        }

        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        grouped
    }

    /// Format with a currency symbol ("¥1,000", "-¥500")
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}", symbol, self.abs().format_grouped())
        } else {
            format!("{}{}", symbol, self.format_grouped())
        }
    }
}

/// Plain digits, or digits grouped in threes ("1,234,567")
fn is_grouped(s: &str) -> bool {
    let all_digits = |g: &str| !g.is_empty() && g.chars().all(|c| c.is_ascii_digit());
    match s.split_once(',') {
        None => all_digits(s),
        Some((head, tail)) => {
            all_digits(head) && head.len() <= 3 && tail.split(',').all(|g| g.len() == 3 && all_digits(g))
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol("¥"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
