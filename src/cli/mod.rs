//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod export;
pub mod report;
pub mod transaction;

pub use audit::handle_audit_command;
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{KakeiboError, KakeiboResult};
use crate::models::{Category, Money, Month, TransactionType};

/// Parse a `YYYY-MM-DD` argument, defaulting to today
pub(crate) fn parse_date(value: Option<&str>) -> KakeiboResult<NaiveDate> {
    match value {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            KakeiboError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
        }),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Parse a `YYYY-MM` argument, defaulting to the current month
///
/// `prev` and `next` step one month away from the current one.
pub(crate) fn parse_month(value: Option<&str>) -> KakeiboResult<Month> {
    month_relative_to(value, Month::current())
}

fn month_relative_to(value: Option<&str>, current: Month) -> KakeiboResult<Month> {
    match value.map(str::trim) {
        None => Ok(current),
        Some("prev") => Ok(current.prev()),
        Some("next") => Ok(current.next()),
        Some(s) => Month::parse(s).map_err(|e| KakeiboError::Validation(e.to_string())),
    }
}

pub(crate) fn parse_amount(value: &str) -> KakeiboResult<Money> {
    Money::parse(value).map_err(|e| {
        KakeiboError::Validation(format!(
            "Invalid amount: '{}'. Use whole yen like '1200' or '1,200' ({})",
            value, e
        ))
    })
}

pub(crate) fn parse_type(value: &str) -> KakeiboResult<TransactionType> {
    value.parse().map_err(KakeiboError::Validation)
}

pub(crate) fn parse_category(value: &str) -> KakeiboResult<Category> {
    value
        .parse()
        .map_err(|_| KakeiboError::category_not_found(value))
}
