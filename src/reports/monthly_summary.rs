//! Monthly Summary Report
//!
//! Income, expense and balance totals for one month.

use std::io::Write;

use crate::error::KakeiboResult;
use crate::models::{Balance, Month, Transaction};
use crate::storage::Storage;

use super::aggregate::aggregate;
use super::export_error;

/// Monthly summary
#[derive(Debug, Clone)]
pub struct MonthlySummaryReport {
    pub month: Month,
    pub balance: Balance,
    pub income_count: usize,
    pub expense_count: usize,
}

impl MonthlySummaryReport {
    /// Generate the summary for `month`
    pub fn generate(storage: &Storage, month: Month) -> KakeiboResult<Self> {
        let transactions = storage.transactions.get_by_month(month)?;
        Ok(Self::from_transactions(month, &transactions))
    }

    /// Build the summary from transactions already filtered to `month`
    pub fn from_transactions(month: Month, transactions: &[Transaction]) -> Self {
        let income_count = transactions.iter().filter(|t| t.is_income()).count();

        Self {
            month,
            balance: aggregate(transactions),
            income_count,
            expense_count: transactions.len() - income_count,
        }
    }

    /// Total number of transactions in the month
    pub fn transaction_count(&self) -> usize {
        self.income_count + self.expense_count
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Monthly Summary: {}\n", self.month));
        output.push_str(&"=".repeat(40));
        output.push('\n');

        output.push_str(&format!(
            "{:<12} {:>16} {:>8}\n",
            "収入 Income",
            self.balance.income.format_with_symbol(currency),
            self.income_count
        ));
        output.push_str(&format!(
            "{:<12} {:>16} {:>8}\n",
            "支出 Expense",
            self.balance.expense.format_with_symbol(currency),
            self.expense_count
        ));
        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<12} {:>16} {:>8}\n",
            "残高 Balance",
            self.balance.balance.format_with_symbol(currency),
            self.transaction_count()
        ));

        if self.transaction_count() == 0 {
            output.push_str("\nNo transactions this month.\n");
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> KakeiboResult<()> {
        writeln!(writer, "Month,Income,Expense,Balance,Transactions").map_err(export_error)?;
        writeln!(
            writer,
            "{},{},{},{},{}",
            self.month,
            self.balance.income.yen(),
            self.balance.expense.yen(),
            self.balance.balance.yen(),
            self.transaction_count()
        )
        .map_err(export_error)?;
        Ok(())
    }
}
