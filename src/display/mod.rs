//! Display formatting for terminal output
//!
//! Provides utilities for formatting transactions and categories for
//! terminal display.

pub mod category;
pub mod transaction;

pub use category::format_category_sets;
pub use transaction::{format_transaction_details, format_transaction_short, format_transaction_table};
