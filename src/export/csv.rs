//! CSV Export functionality
//!
//! Exports transactions with the header `id,date,type,category,content,amount`.

use std::io::Write;

use serde::Serialize;

use crate::error::KakeiboResult;
use crate::models::Transaction;

#[derive(Serialize)]
struct CsvRecord<'a> {
    id: String,
    date: String,
    #[serde(rename = "type")]
    transaction_type: String,
    category: &'static str,
    content: &'a str,
    amount: i64,
}

impl<'a> From<&'a Transaction> for CsvRecord<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            id: txn.id.as_uuid().to_string(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            transaction_type: txn.transaction_type.to_string(),
            category: txn.category.label(),
            content: &txn.content,
            amount: txn.amount.yen(),
        }
    }
}

/// Export transactions to CSV
///
/// The header row is written even when there are no transactions.
pub fn export_transactions_csv<W: Write>(transactions: &[Transaction], writer: W) -> KakeiboResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if transactions.is_empty() {
        csv_writer.write_record(["id", "date", "type", "category", "content", "amount"])?;
    }

    for txn in transactions {
        csv_writer.serialize(CsvRecord::from(txn))?;
    }

    csv_writer.flush()?;
    Ok(())
}
