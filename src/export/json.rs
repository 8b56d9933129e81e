//! JSON Export functionality
//!
//! Exports transactions together with their totals and export metadata.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{KakeiboError, KakeiboResult};
use crate::models::{Balance, Month, Transaction};
use crate::reports::aggregate;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Transaction export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Profile the transactions belong to
    pub user: String,

    /// Month the export covers; `None` for everything
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<Month>,

    /// Totals over `transactions`
    pub summary: Balance,

    pub transactions: Vec<Transaction>,
}

impl TransactionExport {
    /// Build an export of `transactions`
    pub fn new(user: impl Into<String>, month: Option<Month>, transactions: Vec<Transaction>) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user: user.into(),
            month,
            summary: aggregate(&transactions),
            transactions,
        }
    }
}

/// Write an export as JSON
pub fn export_transactions_json<W: Write>(
    export: &TransactionExport,
    writer: &mut W,
    pretty: bool,
) -> KakeiboResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, export)
    } else {
        serde_json::to_writer(&mut *writer, export)
    }
    .map_err(|e| KakeiboError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| KakeiboError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};
    use chrono::NaiveDate;

    fn sample() -> Vec<Transaction> {
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        vec![
            Transaction::income(date, Money::from_yen(3000), "フリマ", Category::SideIncome),
            Transaction::expense(date, Money::from_yen(1800), "映画", Category::Entertainment),
        ]
    }

    #[test]
    fn test_export_json() {
        let export = TransactionExport::new("guest", Month::new(2025, 1), sample());
        let mut buf = Vec::new();
        export_transactions_json(&export, &mut buf, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["user"], "guest");
        assert_eq!(value["month"], "2025-01");
        assert_eq!(value["summary"]["balance"], 1200);
        assert_eq!(value["transactions"].as_array().unwrap().len(), 2);
        assert_eq!(value["transactions"][1]["category"], "娯楽");
    }

    #[test]
    fn test_export_without_month() {
        let export = TransactionExport::new("guest", None, Vec::new());
        let mut buf = Vec::new();
        export_transactions_json(&export, &mut buf, false).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(!text.contains("\"month\""));

        let parsed: TransactionExport = serde_json::from_str(&text).unwrap();
        assert!(parsed.summary.is_zero());
        assert!(parsed.transactions.is_empty());
    }
}
