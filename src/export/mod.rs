//! Export module for kakeibo
//!
//! Writes a set of transactions (usually one month) in two formats:
//! - CSV: one row per transaction, spreadsheet-compatible
//! - JSON: the transactions plus their totals, with schema versioning

pub mod csv;
pub mod json;

pub use self::csv::export_transactions_csv;
pub use self::json::{export_transactions_json, TransactionExport, EXPORT_SCHEMA_VERSION};
