//! Reports module for kakeibo
//!
//! Every report is built from the aggregator functions in [`aggregate`]:
//! monthly and daily summaries, a per-day bar chart, a category breakdown
//! and a month calendar.

pub mod aggregate;
pub mod calendar;
pub mod category;
pub mod daily;
pub mod monthly_summary;

use crate::error::KakeiboError;

pub use aggregate::{aggregate, aggregate_by_category, aggregate_by_date};
pub use calendar::{CalendarEvent, CalendarReport};
pub use category::{CategoryReport, CategoryReportRow};
pub use daily::{DailyBalancesReport, DailySummaryReport};
pub use monthly_summary::MonthlySummaryReport;

fn export_error(e: std::io::Error) -> KakeiboError {
    KakeiboError::Export(e.to_string())
}
