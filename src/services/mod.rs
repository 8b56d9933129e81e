//! Service layer for kakeibo
//!
//! The service layer provides business logic on top of the storage layer:
//! input validation, month and date filtering, and audit logging.

pub mod transaction;

pub use transaction::{TransactionFilter, TransactionService};
