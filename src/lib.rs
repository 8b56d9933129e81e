//! kakeibo - a terminal household account book
//!
//! This library provides the core functionality of the `kakeibo` command:
//! recording income and expense transactions, selecting a month, and
//! summarising the month per day, per category and on a calendar.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, money, balances)
//! - `storage`: Per-user JSON file storage
//! - `services`: Business logic layer
//! - `reports`: Balance aggregation and the reports built on it
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `export`: CSV and JSON export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use kakeibo::models::{Category, Money, Transaction};
//! use kakeibo::reports::aggregate;
//!
//! let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let transactions = vec![
//!     Transaction::income(day, Money::from_yen(1000), "お小遣い", Category::Allowance),
//!     Transaction::expense(day, Money::from_yen(700), "ランチ", Category::Food),
//! ];
//!
//! let balance = aggregate(&transactions);
//! assert_eq!(balance.balance, Money::from_yen(300));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::KakeiboError;
