//! Audit logging for PureNote
//!
//! Every create, update, and delete of a user, diary entry, or tag is
//! appended to `audit.log` as one JSON line, unless the `audit_enabled`
//! setting is off.
//!
//! Audited snapshots are public views: a user is recorded through its
//! profile and an entry through its summary, so the log never holds a
//! password hash, an encryption salt, or diary text.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
