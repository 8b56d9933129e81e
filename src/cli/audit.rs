//! CLI command for the audit log

use crate::error::KakeiboResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
///
/// Entries from every profile are shown unless `all_users` is false, in
/// which case only the current profile's entries are kept.
pub fn handle_audit_command(storage: &Storage, limit: usize, all_users: bool) -> KakeiboResult<()> {
    let mut entries = storage.audit().read_all()?;
    if !all_users {
        entries.retain(|e| e.user == storage.user());
    }

    let start = entries.len().saturating_sub(limit);
    let recent = &entries[start..];

    if recent.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    for entry in recent {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
