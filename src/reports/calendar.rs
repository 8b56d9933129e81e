//! Calendar Report
//!
//! A month grid marking the days that have transactions, followed by one
//! event per such day carrying its income, expense and balance.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::KakeiboResult;
use crate::models::{Balance, Month, Transaction};
use crate::storage::Storage;

use super::aggregate::aggregate_by_date;

const SUNDAY_FIRST: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const MONDAY_FIRST: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// One calendar day's figures, formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    /// ISO date of the day
    pub start: String,
    pub income: String,
    pub expense: String,
    pub balance: String,
}

impl CalendarEvent {
    fn new(date: NaiveDate, balance: &Balance) -> Self {
        Self {
            start: date.format("%Y-%m-%d").to_string(),
            income: balance.income.format_grouped(),
            expense: balance.expense.format_grouped(),
            balance: balance.balance.format_grouped(),
        }
    }
}

/// Month calendar
#[derive(Debug, Clone)]
pub struct CalendarReport {
    pub month: Month,
    pub days: BTreeMap<NaiveDate, Balance>,
    pub week_starts_monday: bool,
}

impl CalendarReport {
    /// Generate the calendar for `month`
    pub fn generate(storage: &Storage, month: Month, week_starts_monday: bool) -> KakeiboResult<Self> {
        let transactions = storage.transactions.get_by_month(month)?;
        Ok(Self::from_transactions(month, &transactions, week_starts_monday))
    }

    /// Build the calendar; transactions outside `month` are ignored
    pub fn from_transactions(month: Month, transactions: &[Transaction], week_starts_monday: bool) -> Self {
        Self {
            month,
            days: aggregate_by_date(transactions.iter().filter(|t| month.contains(t.date))),
            week_starts_monday,
        }
    }

    /// One event per day with transactions, in date order
    pub fn events(&self) -> Vec<CalendarEvent> {
        self.days
            .iter()
            .map(|(date, balance)| CalendarEvent::new(*date, balance))
            .collect()
    }

    /// Column of `date` in the grid
    fn column(&self, date: NaiveDate) -> usize {
        let weekday = date.weekday();
        if self.week_starts_monday {
            weekday.num_days_from_monday() as usize
        } else {
            weekday.num_days_from_sunday() as usize
        }
    }

    /// The grid as rows of weeks; `None` pads days outside the month
    pub fn weeks(&self) -> Vec<[Option<NaiveDate>; 7]> {
        let mut weeks = Vec::new();
        let mut week = [None; 7];

        for date in self.month.days() {
            let col = self.column(date);
            week[col] = Some(date);
            if col == 6 {
                weeks.push(week);
                week = [None; 7];
            }
        }
        if week.iter().any(Option::is_some) {
            weeks.push(week);
        }

        weeks
    }

    /// Format the report for terminal display
    ///
    /// Days with transactions are marked with `*`.
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("{:^35}\n", self.month.to_string()));
        let headers = if self.week_starts_monday {
            MONDAY_FIRST
        } else {
            SUNDAY_FIRST
        };
        for header in headers {
            output.push_str(&format!("{:>4} ", header));
        }
        output.push('\n');

        for week in self.weeks() {
            for cell in week {
                match cell {
                    Some(date) => {
                        let marker = if self.days.contains_key(&date) { "*" } else { " " };
                        output.push_str(&format!("{:>3}{} ", date.day(), marker));
                    }
                    None => output.push_str("     "),
                }
            }
            output.push('\n');
        }

        if self.days.is_empty() {
            output.push_str("\nNo transactions this month.\n");
            return output;
        }

        output.push('\n');
        for event in self.events() {
            output.push_str(&format!(
                "{}  収入 {}{:>10}  支出 {}{:>10}  残高 {}{:>10}\n",
                event.start,
                currency,
                event.income,
                currency,
                event.expense,
                currency,
                event.balance
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::income(date("2025-01-25"), Money::from_yen(250000), "給料", Category::Salary),
            Transaction::expense(date("2025-01-25"), Money::from_yen(1200), "ランチ", Category::Food),
            Transaction::expense(date("2025-01-03"), Money::from_yen(80000), "家賃", Category::Housing),
            Transaction::expense(date("2025-02-01"), Money::from_yen(500), "バス", Category::Transport),
        ]
    }

    fn january() -> Month {
        Month::new(2025, 1).unwrap()
    }

    #[test]
    fn test_events() {
        let report = CalendarReport::from_transactions(january(), &sample(), false);
        let events = report.events();

        assert_eq!(
            events,
            vec![
                CalendarEvent {
                    start: "2025-01-03".into(),
                    income: "0".into(),
                    expense: "80,000".into(),
                    balance: "-80,000".into(),
                },
                CalendarEvent {
                    start: "2025-01-25".into(),
                    income: "250,000".into(),
                    expense: "1,200".into(),
                    balance: "248,800".into(),
                },
            ]
        );
    }

    #[test]
    fn test_weeks_sunday_first() {
        // 2025-01-01 is a Wednesday
        let report = CalendarReport::from_transactions(january(), &[], false);
        let weeks = report.weeks();

        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][3], Some(date("2025-01-01")));
        assert_eq!(weeks[0][2], None);
        assert_eq!(weeks[4][5], Some(date("2025-01-31")));
        assert_eq!(weeks[4][6], None);
    }

    #[test]
    fn test_weeks_monday_first() {
        let report = CalendarReport::from_transactions(january(), &[], true);
        let weeks = report.weeks();

        assert_eq!(weeks[0][2], Some(date("2025-01-01")));
        assert_eq!(weeks[0][6], Some(date("2025-01-05")));
        assert_eq!(weeks[1][0], Some(date("2025-01-06")));
    }

    #[test]
    fn test_every_day_appears_once() {
        let report = CalendarReport::from_transactions(Month::new(2024, 2).unwrap(), &[], false);
        let count = report
            .weeks()
            .iter()
            .flat_map(|w| w.iter())
            .filter(|d| d.is_some())
            .count();
        assert_eq!(count, 29);
    }

    #[test]
    fn test_format_terminal() {
        let output = CalendarReport::from_transactions(january(), &sample(), false).format_terminal("¥");

        assert!(output.contains("2025-01"));
        assert!(output.starts_with(&format!("{:^35}", "2025-01")));
        assert!(output.contains("  3* "));
        assert!(output.contains(" 25* "));
        assert!(output.contains("2025-01-25  収入 ¥   250,000"));
        assert!(!output.contains("2025-02-01"));
    }

    #[test]
    fn test_format_terminal_empty() {
        let output = CalendarReport::from_transactions(january(), &[], true).format_terminal("¥");
        assert!(output.contains("  Mo   Tu"));
        assert!(output.contains("No transactions this month."));
    }
}
