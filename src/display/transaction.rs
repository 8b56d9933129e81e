//! Transaction display formatting
//!
//! Transaction lists are rendered as tables with `tabled`; single
//! transactions as a labelled detail block.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Money, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    transaction_type: &'static str,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Content")]
    content: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, currency: &str) -> Self {
        Self {
            id: txn.id.to_string(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            transaction_type: txn.transaction_type.label(),
            category: txn.category.label(),
            content: truncate(&txn.content, 24),
            amount: txn.signed_amount().format_with_symbol(currency),
        }
    }
}

/// Format a list of transactions as a table, followed by its totals
pub fn format_transaction_table(transactions: &[Transaction], currency: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|t| TransactionRow::new(t, currency));
    let mut table = Table::new(rows);
    table.with(Style::psql());

    let net: Money = transactions.iter().map(Transaction::signed_amount).sum();
    format!(
        "{}\n{} transaction(s), net {}\n",
        table,
        transactions.len(),
        net.format_with_symbol(currency)
    )
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("ID:          {}\n", txn.id.as_uuid()));
    output.push_str(&format!("Date:        {}\n", txn.date.format(date_format)));
    output.push_str(&format!(
        "Type:        {} ({})\n",
        txn.transaction_type.label(),
        txn.transaction_type
    ));
    output.push_str(&format!("Category:    {}\n", txn.category.label()));
    output.push_str(&format!("Content:     {}\n", txn.content));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(currency)));
    output.push_str(&format!(
        "Created:     {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if txn.updated_at != txn.created_at {
        output.push_str(&format!(
            "Updated:     {}\n",
            txn.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    output
}

/// Format a short transaction summary (one line)
pub fn format_transaction_short(txn: &Transaction, currency: &str) -> String {
    format!(
        "{} {} {} {} {}",
        txn.id,
        txn.date.format("%Y-%m-%d"),
        txn.category.label(),
        truncate(&txn.content, 24),
        txn.signed_amount().format_with_symbol(currency)
    )
}

/// Truncate to at most `max_chars` characters
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_chars - 3).collect::<String>())
    }
}
