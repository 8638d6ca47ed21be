//! Display formatting for terminal output
//!
//! Plain-text tables and detail views. Nothing here decrypts; callers pass
//! in already-decrypted entries when content is to be shown.

pub mod entry;
pub mod tag;

pub use entry::{format_entry_details, format_entry_list};
pub use tag::{format_audit_log, format_tag_list, format_user_profile};
