//! Audit trail for every create, update and delete
//!
//! Entries carry before/after snapshots of the entity and are appended to
//! `audit.log` as JSON lines. `generate_diff` produces the short change summary
//! stored on update entries.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
