//! Storage layer for kakeibo
//!
//! Each user profile owns one transactions.json under the data directory.
//! Writes are atomic and every change is mirrored to the audit log.

pub mod file_io;
pub mod transactions;

pub use file_io::{read_json, write_json_atomic};
pub use transactions::TransactionRepository;

use tracing::debug;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::KakeiboPaths;
use crate::error::{KakeiboError, KakeiboResult};
use crate::models::Transaction;

/// Storage for one user profile
pub struct Storage {
    paths: KakeiboPaths,
    user: String,
    pub transactions: TransactionRepository,
    audit: AuditLogger,
}

/// Check that a profile name can be used as a directory name
pub fn validate_user(user: &str) -> KakeiboResult<()> {
    let trimmed = user.trim();
    if trimmed.is_empty() {
        return Err(KakeiboError::Validation("User name cannot be empty".into()));
    }
    if trimmed != user {
        return Err(KakeiboError::Validation(format!(
            "User name '{}' has leading or trailing whitespace",
            user
        )));
    }
    if user == "." || user == ".." || user.contains(['/', '\\']) {
        return Err(KakeiboError::Validation(format!(
            "User name '{}' cannot contain path separators",
            user
        )));
    }
    Ok(())
}

impl Storage {
    /// Open storage for `user`, creating directories as needed
    ///
    /// Data is not read until [`Storage::load`] is called.
    pub fn open(paths: KakeiboPaths, user: impl Into<String>) -> KakeiboResult<Self> {
        let user = user.into();
        validate_user(&user)?;
        paths.ensure_directories()?;

        debug!(user = %user, base = %paths.base_dir().display(), "opening storage");

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file(&user)),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
            user,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &KakeiboPaths {
        &self.paths
    }

    /// The profile this storage belongs to
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Load all data from disk
    pub fn load(&self) -> KakeiboResult<()> {
        self.transactions.load()
    }

    /// Save all data to disk
    pub fn save(&self) -> KakeiboResult<()> {
        self.transactions.save()
    }

    /// The audit logger shared by all profiles
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a creation in the audit log
    pub fn log_create(&self, txn: &Transaction) -> KakeiboResult<()> {
        self.audit.log(&AuditEntry::create(&self.user, txn))
    }

    /// Record an edit in the audit log
    pub fn log_update(&self, before: &Transaction, after: &Transaction) -> KakeiboResult<()> {
        self.audit.log(&AuditEntry::update(&self.user, before, after))
    }

    /// Record deletions in the audit log
    pub fn log_delete(&self, deleted: &[Transaction]) -> KakeiboResult<()> {
        let entries: Vec<_> = deleted
            .iter()
            .map(|txn| AuditEntry::delete(&self.user, txn))
            .collect();
        self.audit.log_batch(&entries)
    }
}
