//! Category Report
//!
//! Breaks one side of a month (income or expense) down by category, with each
//! category's share of that side's total.

use std::io::Write;

use crate::error::KakeiboResult;
use crate::models::{Category, Money, Month, Transaction, TransactionType};
use crate::storage::Storage;

use super::aggregate::aggregate_by_category;
use super::export_error;

/// One category's total
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReportRow {
    pub category: Category,
    pub amount: Money,
    /// Share of the report total, 0-100
    pub percentage: f64,
}

/// Category breakdown for one month and transaction type
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub month: Month,
    pub transaction_type: TransactionType,
    /// Largest first; categories without transactions are absent
    pub rows: Vec<CategoryReportRow>,
    pub total: Money,
}

impl CategoryReport {
    /// Generate the breakdown for `month`
    pub fn generate(
        storage: &Storage,
        month: Month,
        transaction_type: TransactionType,
    ) -> KakeiboResult<Self> {
        let transactions = storage.transactions.get_by_month(month)?;
        Ok(Self::from_transactions(month, transaction_type, &transactions))
    }

    /// Build the breakdown from transactions already filtered to `month`
    pub fn from_transactions(
        month: Month,
        transaction_type: TransactionType,
        transactions: &[Transaction],
    ) -> Self {
        let totals = aggregate_by_category(transactions, transaction_type);
        let total: Money = totals.values().sum();

        let mut rows: Vec<CategoryReportRow> = totals
            .into_iter()
            .map(|(category, amount)| CategoryReportRow {
                category,
                amount,
                percentage: if total.is_zero() {
                    0.0
                } else {
                    amount.yen() as f64 / total.yen() as f64 * 100.0
                },
            })
            .collect();

        // Largest first, ties in category order
        rows.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category.cmp(&b.category)));

        Self {
            month,
            transaction_type,
            rows,
            total,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} by Category: {}\n",
            match self.transaction_type {
                TransactionType::Income => "Income",
                TransactionType::Expense => "Expenses",
            },
            self.month
        ));
        output.push_str(&"=".repeat(44));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str(&format!("No {} this month.\n", self.transaction_type));
            return output;
        }

        for row in &self.rows {
            output.push_str(&format!(
                "{:<10} {:>16} {:>7.1}%\n",
                row.category.label(),
                row.amount.format_with_symbol(currency),
                row.percentage
            ));
        }

        output.push_str(&"-".repeat(44));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>16} {:>7.1}%\n",
            self.transaction_type.label(),
            self.total.format_with_symbol(currency),
            100.0
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> KakeiboResult<()> {
        writeln!(writer, "Month,Type,Category,Amount,Percentage").map_err(export_error)?;

        for row in &self.rows {
            writeln!(
                writer,
                "{},{},{},{},{:.2}",
                self.month,
                self.transaction_type,
                row.category.label(),
                row.amount.yen(),
                row.percentage
            )
            .map_err(export_error)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::income(date("2025-01-25"), Money::from_yen(250000), "給料", Category::Salary),
            Transaction::expense(date("2025-01-03"), Money::from_yen(300), "バス", Category::Transport),
            Transaction::expense(date("2025-01-10"), Money::from_yen(600), "ランチ", Category::Food),
            Transaction::expense(date("2025-01-11"), Money::from_yen(300), "夕食", Category::Food),
            Transaction::expense(date("2025-01-12"), Money::from_yen(300), "洗剤", Category::DailyGoods),
        ]
    }

    fn january() -> Month {
        Month::new(2025, 1).unwrap()
    }

    #[test]
    fn test_expense_breakdown() {
        let report = CategoryReport::from_transactions(january(), TransactionType::Expense, &sample());

        assert_eq!(report.total.yen(), 1500);
        let categories: Vec<_> = report.rows.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![Category::Food, Category::DailyGoods, Category::Transport]
        );
        assert_eq!(report.rows[0].amount.yen(), 900);
        assert!((report.rows[0].percentage - 60.0).abs() < 1e-9);
        assert!((report.rows[1].percentage - 20.0).abs() < 1e-9);

        let sum: f64 = report.rows.iter().map(|r| r.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_income_breakdown() {
        let report = CategoryReport::from_transactions(january(), TransactionType::Income, &sample());
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].category, Category::Salary);
        assert!((report.rows[0].percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_report() {
        let report = CategoryReport::from_transactions(january(), TransactionType::Income, &[]);
        assert!(report.rows.is_empty());
        assert!(report.total.is_zero());
        assert!(report.format_terminal("¥").contains("No income this month."));
    }

    #[test]
    fn test_format_terminal() {
        let output = CategoryReport::from_transactions(january(), TransactionType::Expense, &sample())
            .format_terminal("¥");

        assert!(output.contains("Expenses by Category: 2025-01"));
        assert!(output.contains("食費"));
        assert!(output.contains("60.0%"));
        assert!(output.contains("¥1,500"));
    }

    #[test]
    fn test_export_csv() {
        let report = CategoryReport::from_transactions(january(), TransactionType::Expense, &sample());
        let mut buf = Vec::new();
        report.export_csv(&mut buf).unwrap();

        let csv = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "Month,Type,Category,Amount,Percentage");
        assert_eq!(lines[1], "2025-01,expense,食費,900,60.00");
        assert_eq!(lines.len(), 4);
    }
}
