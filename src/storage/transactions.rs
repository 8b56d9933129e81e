//! Transaction repository for JSON storage
//!
//! Holds one user's transactions in memory, indexed by month, and persists
//! them to that user's transactions.json.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::KakeiboError;
use crate::models::{Month, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

fn lock_error(e: impl std::fmt::Display) -> KakeiboError {
    KakeiboError::Storage(format!("Failed to acquire lock: {}", e))
}

/// Date order, oldest first; ties keep creation order
fn sort_chronological(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
}

/// Repository for transaction persistence with a month index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: month -> transaction_ids
    by_month: RwLock<HashMap<Month, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_month: RwLock::new(HashMap::new()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load transactions from disk and rebuild the index
    pub fn load(&self) -> Result<(), KakeiboError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_month = self.by_month.write().map_err(lock_error)?;

        data.clear();
        by_month.clear();

        for txn in file_data.transactions {
            by_month.entry(Month::of(txn.date)).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        debug!(path = %self.path.display(), count = data.len(), "loaded transactions");
        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), KakeiboError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_chronological(&mut transactions);

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, KakeiboError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, oldest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, KakeiboError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_chronological(&mut transactions);
        Ok(transactions)
    }

    /// Get the transactions dated within `month`, oldest first
    pub fn get_by_month(&self, month: Month) -> Result<Vec<Transaction>, KakeiboError> {
        let data = self.data.read().map_err(lock_error)?;
        let by_month = self.by_month.read().map_err(lock_error)?;

        let ids = by_month.get(&month).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        sort_chronological(&mut transactions);
        Ok(transactions)
    }

    /// Get the transactions dated exactly `date`
    pub fn get_by_date(&self, date: NaiveDate) -> Result<Vec<Transaction>, KakeiboError> {
        let mut transactions = self.get_by_month(Month::of(date))?;
        transactions.retain(|t| t.date == date);
        Ok(transactions)
    }

    /// Find transactions whose ID matches a full or short identifier
    pub fn find(&self, identifier: &str) -> Result<Vec<Transaction>, KakeiboError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data
            .values()
            .filter(|t| t.id.matches(identifier))
            .cloned()
            .collect())
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), KakeiboError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_month = self.by_month.write().map_err(lock_error)?;

        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_month.get_mut(&Month::of(old.date)) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_month.entry(Month::of(txn.date)).or_default().push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction, returning it if it existed
    pub fn delete(&self, id: TransactionId) -> Result<Option<Transaction>, KakeiboError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_month = self.by_month.write().map_err(lock_error)?;

        let removed = data.remove(&id);
        if let Some(txn) = &removed {
            if let Some(ids) = by_month.get_mut(&Month::of(txn.date)) {
                ids.retain(|&tid| tid != id);
            }
        }
        Ok(removed)
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, KakeiboError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
