//! Audit log CLI command

use crate::display::format_audit_entries;
use crate::error::ExpenseResult;
use crate::storage::Storage;

/// Print the most recent `count` audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, count: usize) -> ExpenseResult<()> {
    let audit = storage.audit();
    let entries = audit.read_recent(count)?;

    print!("{}", format_audit_entries(&entries));
    if !entries.is_empty() {
        println!("Showing {} of {} entries", entries.len(), audit.entry_count()?);
    }
    Ok(())
}
