//! Audit log CLI command

use crate::display::format_audit_log;
use crate::error::PureNoteResult;
use crate::models::User;
use crate::storage::Storage;

/// Print the user's most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, user: &User, limit: usize) -> PureNoteResult<()> {
    let mut entries = storage.audit().read_for_user(user.id)?;
    let total = entries.len();
    let shown = entries.split_off(total.saturating_sub(limit));

    println!("{}", format_audit_log(&shown));
    if total > shown.len() {
        println!();
        println!("Showing {} of {} entries.", shown.len(), total);
    }

    Ok(())
}
