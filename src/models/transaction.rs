//! Transaction model
//!
//! A transaction is one income or expense event. New and edited transactions
//! enter through [`TransactionDraft`], which carries the input-boundary
//! validation rules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::ids::TransactionId;
use super::money::Money;

/// Maximum length of the content label, in characters
pub const CONTENT_MAX_CHARS: usize = 50;

/// Largest amount a single transaction may carry (just under ¥1 trillion)
///
/// Millions of maximal records still sum well inside `i64`.
pub const AMOUNT_MAX: Money = Money::from_yen(999_999_999_999);

/// Whether a transaction is money in or money out
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Japanese label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "収入",
            Self::Expense => "支出",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.pad("income"),
            Self::Expense => f.pad("expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "収入" => Ok(Self::Income),
            "expense" | "out" | "支出" => Ok(Self::Expense),
            other => Err(format!(
                "Invalid transaction type '{}'. Use 'income' or 'expense'",
                other
            )),
        }
    }
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, assigned on creation
    pub id: TransactionId,

    /// Transaction date
    pub date: NaiveDate,

    /// Amount in whole yen
    pub amount: Money,

    /// Free-text label
    pub content: String,

    /// Income or expense
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Category from the set matching `transaction_type`
    pub category: Category,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction without validating it
    pub fn new(
        date: NaiveDate,
        amount: Money,
        content: impl Into<String>,
        transaction_type: TransactionType,
        category: Category,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            date,
            amount,
            content: content.into(),
            transaction_type,
            category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Convenience constructor for an income transaction
    pub fn income(date: NaiveDate, amount: Money, content: impl Into<String>, category: Category) -> Self {
        Self::new(date, amount, content, TransactionType::Income, category)
    }

    /// Convenience constructor for an expense transaction
    pub fn expense(date: NaiveDate, amount: Money, content: impl Into<String>, category: Category) -> Self {
        Self::new(date, amount, content, TransactionType::Expense, category)
    }

    /// Check if this is income
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    /// Check if this is an expense
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Amount with expenses negated
    pub fn signed_amount(&self) -> Money {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// The editable fields of this transaction as a draft
    pub fn to_draft(&self) -> TransactionDraft {
        TransactionDraft {
            transaction_type: self.transaction_type,
            date: self.date,
            amount: self.amount,
            content: self.content.clone(),
            category: Some(self.category),
        }
    }

    /// Overwrite the editable fields from a validated draft
    pub fn apply(&mut self, draft: &TransactionDraft) -> Result<(), Vec<TransactionValidationError>> {
        let category = draft.validate()?;
        self.transaction_type = draft.transaction_type;
        self.date = draft.date;
        self.amount = draft.amount;
        self.content = draft.content.trim().to_string();
        self.category = category;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.content,
            self.signed_amount()
        )
    }
}

/// Input form for creating or editing a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub date: NaiveDate,
    pub amount: Money,
    pub content: String,
    /// `None` until the user picks one
    pub category: Option<Category>,
}

impl TransactionDraft {
    /// Validate the draft, collecting every violation
    ///
    /// Returns the selected category on success.
    pub fn validate(&self) -> Result<Category, Vec<TransactionValidationError>> {
        let mut errors = Vec::new();

        if self.amount.yen() < 1 {
            errors.push(TransactionValidationError::AmountTooSmall(self.amount));
        } else if self.amount > AMOUNT_MAX {
            errors.push(TransactionValidationError::AmountTooLarge(self.amount));
        }

        let content_len = self.content.trim().chars().count();
        if content_len == 0 {
            errors.push(TransactionValidationError::EmptyContent);
        } else if content_len > CONTENT_MAX_CHARS {
            errors.push(TransactionValidationError::ContentTooLong(content_len));
        }

        match self.category {
            None => errors.push(TransactionValidationError::MissingCategory),
            Some(category) if !category.belongs_to(self.transaction_type) => {
                errors.push(TransactionValidationError::CategoryTypeMismatch {
                    category,
                    transaction_type: self.transaction_type,
                });
            }
            Some(_) => {}
        }

        match (errors.is_empty(), self.category) {
            (true, Some(category)) => Ok(category),
            _ => Err(errors),
        }
    }

    /// Validate and build a new transaction
    pub fn into_transaction(self) -> Result<Transaction, Vec<TransactionValidationError>> {
        let category = self.validate()?;
        Ok(Transaction::new(
            self.date,
            self.amount,
            self.content.trim(),
            self.transaction_type,
            category,
        ))
    }
}

/// Validation errors for transaction input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    AmountTooSmall(Money),
    AmountTooLarge(Money),
    EmptyContent,
    ContentTooLong(usize),
    MissingCategory,
    CategoryTypeMismatch {
        category: Category,
        transaction_type: TransactionType,
    },
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmountTooSmall(amount) => {
                write!(f, "Amount must be at least ¥1 (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount must be at most {} (got {})", AMOUNT_MAX, amount)
            }
            Self::EmptyContent => write!(f, "Content is required"),
            Self::ContentTooLong(len) => write!(
                f,
                "Content must be {} characters or fewer (got {})",
                CONTENT_MAX_CHARS, len
            ),
            Self::MissingCategory => write!(f, "Select a category"),
            Self::CategoryTypeMismatch {
                category,
                transaction_type,
            } => write!(
                f,
                "Category '{}' cannot be used for {} transactions",
                category, transaction_type
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

/// Join validation errors into a single message
pub fn join_validation_errors(errors: &[TransactionValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: &str) -> NaiveDate {
        NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()
    }

    fn draft() -> TransactionDraft {
        TransactionDraft {
            transaction_type: TransactionType::Expense,
            date: date("2025-01-15"),
            amount: Money::from_yen(1200),
            content: "ランチ".to_string(),
            category: Some(Category::Food),
        }
    }

    #[test]
    fn test_valid_draft() {
        let txn = draft().into_transaction().unwrap();
        assert_eq!(txn.amount.yen(), 1200);
        assert_eq!(txn.category, Category::Food);
        assert!(txn.is_expense());
        assert_eq!(txn.signed_amount().yen(), -1200);
    }

    #[test]
    fn test_amount_must_be_positive() {
        let mut d = draft();
        d.amount = Money::zero();
        assert_eq!(
            d.validate(),
            Err(vec![TransactionValidationError::AmountTooSmall(Money::zero())])
        );
    }

    #[test]
    fn test_amount_upper_bound() {
        let mut d = draft();
        d.amount = AMOUNT_MAX;
        assert!(d.validate().is_ok());

        d.amount = Money::parse("9,000,000,000,000,000,000").unwrap();
        assert_eq!(
            d.validate(),
            Err(vec![TransactionValidationError::AmountTooLarge(d.amount)])
        );
        assert!(d.validate().unwrap_err()[0].to_string().contains("¥999,999,999,999"));
    }

    #[test]
    fn test_content_length_counts_characters() {
        let mut d = draft();
        d.content = "あ".repeat(50);
        assert!(d.validate().is_ok());

        d.content = "あ".repeat(51);
        assert_eq!(
            d.validate(),
            Err(vec![TransactionValidationError::ContentTooLong(51)])
        );

        d.content = "   ".to_string();
        assert_eq!(d.validate(), Err(vec![TransactionValidationError::EmptyContent]));
    }

    #[test]
    fn test_category_must_match_type() {
        let mut d = draft();
        d.category = Some(Category::Salary);
        assert_eq!(
            d.validate(),
            Err(vec![TransactionValidationError::CategoryTypeMismatch {
                category: Category::Salary,
                transaction_type: TransactionType::Expense,
            }])
        );

        d.category = None;
        assert_eq!(d.validate(), Err(vec![TransactionValidationError::MissingCategory]));
    }

    #[test]
    fn test_collects_all_errors() {
        let d = TransactionDraft {
            transaction_type: TransactionType::Income,
            date: date("2025-01-15"),
            amount: Money::zero(),
            content: String::new(),
            category: None,
        };
        let errors = d.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(join_validation_errors(&errors).contains("Select a category"));
    }

    #[test]
    fn test_apply_draft() {
        let mut txn = draft().into_transaction().unwrap();
        let id = txn.id;

        let mut edit = txn.to_draft();
        edit.transaction_type = TransactionType::Income;
        edit.category = Some(Category::SideIncome);
        edit.content = " フリマ ".to_string();
        txn.apply(&edit).unwrap();

        assert_eq!(txn.id, id);
        assert!(txn.is_income());
        assert_eq!(txn.content, "フリマ");
    }

    #[test]
    fn test_apply_rejects_invalid_draft() {
        let mut txn = draft().into_transaction().unwrap();
        let before = txn.clone();

        let mut edit = txn.to_draft();
        edit.amount = Money::from_yen(-5);
        assert!(txn.apply(&edit).is_err());
        assert_eq!(txn, before);
    }

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!("income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert_eq!("支出".parse::<TransactionType>().unwrap(), TransactionType::Expense);
        assert!("transfer".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_serialization_uses_type_key() {
        let txn = draft().into_transaction().unwrap();
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2025-01-15");
        assert_eq!(json["category"], "食費");
        assert_eq!(json["amount"], 1200);
    }

    #[test]
    fn test_display() {
        let txn = draft().into_transaction().unwrap();
        assert_eq!(txn.to_string(), "2025-01-15 食費 ランチ -¥1,200");
    }
}
