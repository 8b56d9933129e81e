//! Append-only audit log writer
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{KakeiboError, KakeiboResult};

use super::entry::AuditEntry;

/// Writes audit entries to the audit log file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry
    pub fn log(&self, entry: &AuditEntry) -> KakeiboResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append several entries with a single flush
    pub fn log_batch(&self, entries: &[AuditEntry]) -> KakeiboResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| KakeiboError::Io(format!("Failed to open audit log: {}", e)))?;

        for entry in entries {
            let json = serde_json::to_string(entry).map_err(|e| {
                KakeiboError::Json(format!("Failed to serialize audit entry: {}", e))
            })?;

            writeln!(file, "{}", json)
                .map_err(|e| KakeiboError::Io(format!("Failed to write audit entry: {}", e)))?;
        }

        file.flush()
            .map_err(|e| KakeiboError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read all audit entries, oldest first
    pub fn read_all(&self) -> KakeiboResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| KakeiboError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                KakeiboError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                KakeiboError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> KakeiboResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    /// Path of the audit log file
    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::Operation;
    use crate::models::{Category, Money, Transaction};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn txn(day: u32) -> Transaction {
        Transaction::expense(
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            Money::from_yen(100 * day as i64),
            "切符",
            Category::Transport,
        )
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        logger.log(&AuditEntry::create("guest", &txn(1))).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].user, "guest");
    }

    #[test]
    fn test_log_batch_and_read_recent() {
        let (logger, _temp) = create_test_logger();

        let txns: Vec<_> = (1..=5).map(txn).collect();
        let entries: Vec<_> = txns.iter().map(|t| AuditEntry::delete("guest", t)).collect();
        logger.log_batch(&entries).unwrap();

        let recent = logger.read_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].transaction_id, txns[3].id);
        assert_eq!(recent[1].transaction_id, txns[4].id);

        assert_eq!(logger.read_recent(50).unwrap().len(), 5);
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert!(!logger.path().exists());
        assert!(logger.read_all().unwrap().is_empty());
        logger.log_batch(&[]).unwrap();
        assert!(!logger.path().exists());
    }

    #[test]
    fn test_survives_restart() {
        let (logger, temp) = create_test_logger();
        logger.log(&AuditEntry::create("guest", &txn(2))).unwrap();

        let logger2 = AuditLogger::new(temp.path().join("audit.log"));
        assert_eq!(logger2.read_all().unwrap().len(), 1);
    }
}
