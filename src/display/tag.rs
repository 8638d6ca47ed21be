//! Tag and profile display formatting

use crate::audit::AuditEntry;
use crate::config::Settings;
use crate::models::{TagUsage, User};

/// Format tags with their usage counts
pub fn format_tag_list(tags: &[TagUsage]) -> String {
    if tags.is_empty() {
        return "No tags yet.".to_string();
    }

    let name_width = tags
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(3)
        .max(3);

    let mut output = format!("{:<name_width$}  {:>7}\n", "Tag", "Entries");
    output.push_str(&format!("{:-<name_width$}  {:->7}\n", "", ""));
    for tag in tags {
        output.push_str(&format!(
            "{:<name_width$}  {:>7}\n",
            tag.name, tag.entry_count
        ));
    }
    output
}

/// Format a user's public profile
pub fn format_user_profile(user: &User, entry_count: usize, settings: &Settings) -> String {
    let mut output = format!("User: {}\n", user.username);
    output.push_str(&format!("  ID:      {}\n", user.id));
    output.push_str(&format!("  Email:   {}\n", user.email));
    if let Some(name) = user.display_name() {
        output.push_str(&format!("  Name:    {}\n", name));
    }
    output.push_str(&format!("  Entries: {}\n", entry_count));
    output.push_str(&format!(
        "  Joined:  {}\n",
        user.created_at.format(&settings.date_format)
    ));
    output
}

/// Format audit entries, oldest first
pub fn format_audit_log(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "Audit log is empty.".to_string();
    }

    entries
        .iter()
        .map(|e| e.format_human_readable())
        .collect::<Vec<_>>()
        .join("\n")
}
