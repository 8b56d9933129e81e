//! Audit trail for kakeibo
//!
//! Every create, update and delete of a transaction is appended to an
//! audit log as one JSON object per line (JSONL), including the record's
//! state before and after the change.
//!
//! - `AuditEntry`: one logged operation
//! - `AuditLogger`: appends to and reads back the log file
//! - `field_diff`: short human-readable summary of what an update changed

mod diff;
mod entry;
mod logger;

pub use diff::field_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
