//! Transaction service
//!
//! Provides the create/edit/delete workflow for transactions and the month
//! and date views the reports are built from.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{KakeiboError, KakeiboResult};
use crate::models::{
    join_validation_errors, Category, Month, Transaction, TransactionDraft, TransactionId,
    TransactionType,
};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Only transactions dated within this month
    pub month: Option<Month>,
    /// Only transactions dated exactly this day
    pub date: Option<NaiveDate>,
    /// Only income or only expense
    pub transaction_type: Option<TransactionType>,
    pub category: Option<Category>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by month
    pub fn month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    /// Filter by exact date
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Filter by transaction type
    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    /// Filter by category
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn accepts(&self, txn: &Transaction) -> bool {
        self.month.map_or(true, |m| m.contains(txn.date))
            && self.date.map_or(true, |d| txn.date == d)
            && self.transaction_type.map_or(true, |t| txn.transaction_type == t)
            && self.category.map_or(true, |c| txn.category == c)
    }
}

fn validation_error(errors: &[crate::models::TransactionValidationError]) -> KakeiboError {
    KakeiboError::Validation(join_validation_errors(errors))
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate a draft and record it as a new transaction
    pub fn create(&self, draft: TransactionDraft) -> KakeiboResult<Transaction> {
        let txn = draft
            .into_transaction()
            .map_err(|errors| validation_error(&errors))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        self.storage.log_create(&txn)?;

        info!(id = %txn.id, date = %txn.date, amount = txn.amount.yen(), "created transaction");
        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> KakeiboResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full UUID or short `txn-xxxxxxxx` form
    ///
    /// A short form that matches more than one transaction is rejected.
    pub fn find(&self, identifier: &str) -> KakeiboResult<Option<Transaction>> {
        if let Ok(id) = identifier.trim().parse::<TransactionId>() {
            return self.storage.transactions.get(id);
        }

        let mut matches = self.storage.transactions.find(identifier)?;
        match matches.len() {
            0 | 1 => Ok(matches.pop()),
            n => Err(KakeiboError::Validation(format!(
                "'{}' matches {} transactions; use a longer ID",
                identifier, n
            ))),
        }
    }

    /// Find a transaction, failing if it does not exist
    pub fn resolve(&self, identifier: &str) -> KakeiboResult<Transaction> {
        self.find(identifier)?
            .ok_or_else(|| KakeiboError::transaction_not_found(identifier))
    }

    /// List transactions, oldest first, with optional filtering
    pub fn list(&self, filter: TransactionFilter) -> KakeiboResult<Vec<Transaction>> {
        let mut transactions = if let Some(date) = filter.date {
            self.storage.transactions.get_by_date(date)?
        } else if let Some(month) = filter.month {
            self.storage.transactions.get_by_month(month)?
        } else {
            self.storage.transactions.get_all()?
        };

        transactions.retain(|t| filter.accepts(t));

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        debug!(count = transactions.len(), ?filter, "listed transactions");
        Ok(transactions)
    }

    /// Transactions dated within `month`
    pub fn for_month(&self, month: Month) -> KakeiboResult<Vec<Transaction>> {
        self.storage.transactions.get_by_month(month)
    }

    /// Transactions dated exactly `date`
    pub fn for_date(&self, date: NaiveDate) -> KakeiboResult<Vec<Transaction>> {
        self.storage.transactions.get_by_date(date)
    }

    /// Replace the editable fields of a transaction
    ///
    /// The id and creation time are kept. Nothing is written if the draft
    /// is invalid.
    pub fn update(&self, id: TransactionId, draft: &TransactionDraft) -> KakeiboResult<Transaction> {
        let before = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| KakeiboError::transaction_not_found(id.to_string()))?;

        let mut txn = before.clone();
        txn.apply(draft).map_err(|errors| validation_error(&errors))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        self.storage.log_update(&before, &txn)?;

        info!(id = %txn.id, "updated transaction");
        Ok(txn)
    }

    /// Delete one or more transactions
    ///
    /// Every id must exist; if any is unknown nothing is deleted. Repeated
    /// ids are deleted once.
    pub fn delete(&self, ids: &[TransactionId]) -> KakeiboResult<Vec<Transaction>> {
        let mut unique = ids.to_vec();
        unique.sort();
        unique.dedup();

        for id in &unique {
            if self.storage.transactions.get(*id)?.is_none() {
                return Err(KakeiboError::transaction_not_found(id.to_string()));
            }
        }

        let mut deleted = Vec::with_capacity(unique.len());
        for id in unique {
            if let Some(txn) = self.storage.transactions.delete(id)? {
                deleted.push(txn);
            }
        }

        self.storage.transactions.save()?;
        self.storage.log_delete(&deleted)?;

        info!(count = deleted.len(), "deleted transactions");
        Ok(deleted)
    }

    /// Count all transactions
    pub fn count(&self) -> KakeiboResult<usize> {
        self.storage.transactions.count()
    }
}
