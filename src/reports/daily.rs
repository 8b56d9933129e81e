//! Daily Reports
//!
//! The summary for a single day and the per-day balances of a month, which
//! the `chart` command draws as text bars.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::NaiveDate;

use crate::error::KakeiboResult;
use crate::models::{Balance, Money, Month, Transaction};
use crate::storage::Storage;

use super::aggregate::{aggregate, aggregate_by_date};
use super::export_error;

/// Width of the longest bar in the chart, in cells
const BAR_WIDTH: usize = 30;

/// Summary of one day
#[derive(Debug, Clone)]
pub struct DailySummaryReport {
    pub date: NaiveDate,
    pub balance: Balance,
    /// The day's transactions in creation order
    pub transactions: Vec<Transaction>,
}

impl DailySummaryReport {
    /// Generate the summary for `date`
    pub fn generate(storage: &Storage, date: NaiveDate) -> KakeiboResult<Self> {
        let transactions = storage.transactions.get_by_date(date)?;
        Ok(Self::from_transactions(date, transactions))
    }

    /// Build the summary, keeping only transactions dated `date`
    pub fn from_transactions(date: NaiveDate, mut transactions: Vec<Transaction>) -> Self {
        transactions.retain(|t| t.date == date);
        Self {
            date,
            balance: aggregate(&transactions),
            transactions,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Daily Summary: {}\n", self.date.format("%Y-%m-%d (%a)")));
        output.push_str(&"=".repeat(48));
        output.push('\n');
        output.push_str(&format!(
            "収入 {}  支出 {}  残高 {}\n",
            self.balance.income.format_with_symbol(currency),
            self.balance.expense.format_with_symbol(currency),
            self.balance.balance.format_with_symbol(currency)
        ));
        output.push_str(&"-".repeat(48));
        output.push('\n');

        if self.transactions.is_empty() {
            output.push_str("No transactions on this day.\n");
            return output;
        }

        for txn in &self.transactions {
            output.push_str(&format!(
                "{:<12} {:<6} {:<20} {:>14}\n",
                txn.id.to_string(),
                txn.category.label(),
                txn.content,
                txn.signed_amount().format_with_symbol(currency)
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> KakeiboResult<()> {
        write_balance_header(writer)?;
        write_balance_row(writer, self.date, &self.balance)
    }
}

/// Per-day balances of one month
#[derive(Debug, Clone)]
pub struct DailyBalancesReport {
    pub month: Month,
    /// Days that have transactions, in date order
    pub days: BTreeMap<NaiveDate, Balance>,
    pub total: Balance,
}

impl DailyBalancesReport {
    /// Generate the per-day balances for `month`
    pub fn generate(storage: &Storage, month: Month) -> KakeiboResult<Self> {
        let transactions = storage.transactions.get_by_month(month)?;
        Ok(Self::from_transactions(month, &transactions))
    }

    /// Build the report from transactions already filtered to `month`
    pub fn from_transactions(month: Month, transactions: &[Transaction]) -> Self {
        Self {
            month,
            days: aggregate_by_date(transactions),
            total: aggregate(transactions),
        }
    }

    /// Largest single-day income or expense
    fn peak(&self) -> Money {
        self.days
            .values()
            .map(|b| b.income.max(b.expense))
            .max()
            .unwrap_or_default()
    }

    /// Format as a text bar chart, one income and one expense bar per day
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Daily Income / Expense: {}\n", self.month));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.days.is_empty() {
            output.push_str("No transactions this month.\n");
            return output;
        }

        let peak = self.peak();
        for (date, balance) in &self.days {
            output.push_str(&format!(
                "{}  収入 {:<width$} {}\n",
                date.format("%m-%d"),
                bar('+', balance.income, peak),
                balance.income.format_with_symbol(currency),
                width = BAR_WIDTH
            ));
            output.push_str(&format!(
                "       支出 {:<width$} {}\n",
                bar('-', balance.expense, peak),
                balance.expense.format_with_symbol(currency),
                width = BAR_WIDTH
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Total  収入 {}  支出 {}  残高 {}\n",
            self.total.income.format_with_symbol(currency),
            self.total.expense.format_with_symbol(currency),
            self.total.balance.format_with_symbol(currency)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> KakeiboResult<()> {
        write_balance_header(writer)?;
        for (date, balance) in &self.days {
            write_balance_row(writer, *date, balance)?;
        }
        Ok(())
    }
}

/// A bar scaled against `peak`; any non-zero amount gets at least one cell
fn bar(fill: char, amount: Money, peak: Money) -> String {
    if amount.yen() <= 0 || peak.yen() <= 0 {
        return String::new();
    }
    let cells = (amount.yen() as u128 * BAR_WIDTH as u128 / peak.yen() as u128) as usize;
    std::iter::repeat(fill).take(cells.clamp(1, BAR_WIDTH)).collect()
}

fn write_balance_header<W: Write>(writer: &mut W) -> KakeiboResult<()> {
    writeln!(writer, "Date,Income,Expense,Balance").map_err(export_error)
}

fn write_balance_row<W: Write>(writer: &mut W, date: NaiveDate, balance: &Balance) -> KakeiboResult<()> {
    writeln!(
        writer,
        "{},{},{},{}",
        date,
        balance.income.yen(),
        balance.expense.yen(),
        balance.balance.yen()
    )
    .map_err(export_error)
}
