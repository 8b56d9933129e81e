//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Transaction, TransactionId};

use super::diff::field_diff;

/// Types of operations that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Profile whose data changed
    pub user: String,

    pub transaction_id: TransactionId,

    /// One-line description, e.g. "2025-01-15 食費 ランチ"
    pub summary: String,

    /// Record before the operation (updates and deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Record after the operation (creates and updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

fn summarize(txn: &Transaction) -> String {
    format!("{} {} {}", txn.date, txn.category, txn.content)
}

impl AuditEntry {
    /// Entry for a newly created transaction
    pub fn create(user: impl Into<String>, txn: &Transaction) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            user: user.into(),
            transaction_id: txn.id,
            summary: summarize(txn),
            before: None,
            after: serde_json::to_value(txn).ok(),
            diff_summary: None,
        }
    }

    /// Entry for an edited transaction, with a field diff
    pub fn update(user: impl Into<String>, before: &Transaction, after: &Transaction) -> Self {
        let before_json = serde_json::to_value(before).ok();
        let after_json = serde_json::to_value(after).ok();
        let diff_summary = match (&before_json, &after_json) {
            (Some(b), Some(a)) => field_diff(b, a),
            _ => None,
        };

        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            user: user.into(),
            transaction_id: after.id,
            summary: summarize(after),
            before: before_json,
            after: after_json,
            diff_summary,
        }
    }

    /// Entry for a deleted transaction
    pub fn delete(user: impl Into<String>, txn: &Transaction) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            user: user.into(),
            transaction_id: txn.id,
            summary: summarize(txn),
            before: serde_json::to_value(txn).ok(),
            after: None,
            diff_summary: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.user,
            self.transaction_id,
            self.summary
        );

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}
