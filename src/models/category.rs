//! Transaction categories
//!
//! Categories form two fixed sets, one per transaction type: three income
//! categories and six expense categories. They serialize with their Japanese
//! labels; the CLI also accepts an English slug.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::transaction::TransactionType;

/// A transaction category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "給与")]
    Salary,
    #[serde(rename = "副収入")]
    SideIncome,
    #[serde(rename = "お小遣い")]
    Allowance,
    #[serde(rename = "食費")]
    Food,
    #[serde(rename = "日用品")]
    DailyGoods,
    #[serde(rename = "住居費")]
    Housing,
    #[serde(rename = "交際費")]
    Socializing,
    #[serde(rename = "娯楽")]
    Entertainment,
    #[serde(rename = "交通費")]
    Transport,
}

impl Category {
    /// Categories available to income transactions
    pub const INCOME: [Category; 3] = [Self::Salary, Self::SideIncome, Self::Allowance];

    /// Categories available to expense transactions
    pub const EXPENSE: [Category; 6] = [
        Self::Food,
        Self::DailyGoods,
        Self::Housing,
        Self::Socializing,
        Self::Entertainment,
        Self::Transport,
    ];

    /// Every category, income first
    pub fn all() -> impl Iterator<Item = Category> {
        Self::INCOME.into_iter().chain(Self::EXPENSE)
    }

    /// The category set for a transaction type
    pub fn for_type(transaction_type: TransactionType) -> &'static [Category] {
        match transaction_type {
            TransactionType::Income => &Self::INCOME,
            TransactionType::Expense => &Self::EXPENSE,
        }
    }

    /// The transaction type this category belongs to
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Salary | Self::SideIncome | Self::Allowance => TransactionType::Income,
            _ => TransactionType::Expense,
        }
    }

    /// Check whether this category may be used with `transaction_type`
    pub fn belongs_to(&self, transaction_type: TransactionType) -> bool {
        self.transaction_type() == transaction_type
    }

    /// Japanese label, as stored
    pub fn label(&self) -> &'static str {
        match self {
            Self::Salary => "給与",
            Self::SideIncome => "副収入",
            Self::Allowance => "お小遣い",
            Self::Food => "食費",
            Self::DailyGoods => "日用品",
            Self::Housing => "住居費",
            Self::Socializing => "交際費",
            Self::Entertainment => "娯楽",
            Self::Transport => "交通費",
        }
    }

    /// English slug accepted on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::SideIncome => "side-income",
            Self::Allowance => "allowance",
            Self::Food => "food",
            Self::DailyGoods => "daily-goods",
            Self::Housing => "housing",
            Self::Socializing => "socializing",
            Self::Entertainment => "entertainment",
            Self::Transport => "transport",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::all()
            .find(|c| c.label() == s || c.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| CategoryParseError::Unknown(s.to_string()))
    }
}

/// Error type for category parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryParseError {
    Unknown(String),
}

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(s) => write!(f, "Unknown category: {}", s),
        }
    }
}

impl std::error::Error for CategoryParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_sets() {
        assert_eq!(Category::for_type(TransactionType::Income).len(), 3);
        assert_eq!(Category::for_type(TransactionType::Expense).len(), 6);
        assert_eq!(Category::all().count(), 9);

        for c in Category::INCOME {
            assert!(c.belongs_to(TransactionType::Income));
        }
        for c in Category::EXPENSE {
            assert!(c.belongs_to(TransactionType::Expense));
            assert!(!c.belongs_to(TransactionType::Income));
        }
    }

    #[test]
    fn test_parse_label_and_slug() {
        assert_eq!("食費".parse::<Category>().unwrap(), Category::Food);
        assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!("Side-Income".parse::<Category>().unwrap(), Category::SideIncome);
        assert_eq!("お小遣い".parse::<Category>().unwrap(), Category::Allowance);
        assert!("groceries".parse::<Category>().is_err());
    }

    #[test]
    fn test_serializes_with_label() {
        let json = serde_json::to_string(&Category::Transport).unwrap();
        assert_eq!(json, "\"交通費\"");
        let parsed: Category = serde_json::from_str("\"住居費\"").unwrap();
        assert_eq!(parsed, Category::Housing);
    }
}
