//! Core data models for kakeibo
//!
//! This module contains the data structures of the household account book:
//! transactions, categories, money, months and derived balances.

pub mod balance;
pub mod category;
pub mod ids;
pub mod money;
pub mod month;
pub mod transaction;

pub use balance::Balance;
pub use category::{Category, CategoryParseError};
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use month::{Month, MonthParseError};
pub use transaction::{
    join_validation_errors, Transaction, TransactionDraft, TransactionType,
    TransactionValidationError, AMOUNT_MAX, CONTENT_MAX_CHARS,
};
