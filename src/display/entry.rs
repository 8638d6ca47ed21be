//! Diary entry display formatting
//!
//! Formats entries for terminal output in table and detail views.

use crate::config::Settings;
use crate::models::{DecryptedEntry, EntrySummary};

const TITLE_COLUMN_MAX: usize = 40;

/// Format a list of entry summaries as a table
pub fn format_entry_list(summaries: &[EntrySummary], settings: &Settings) -> String {
    if summaries.is_empty() {
        return "No diary entries found.".to_string();
    }

    let rows: Vec<_> = summaries
        .iter()
        .map(|s| {
            (
                s.id.to_string(),
                s.created_at.format(&settings.date_format).to_string(),
                clip(&s.title, TITLE_COLUMN_MAX),
                s.mood.clone().unwrap_or_default(),
                s.tags.join(", "),
            )
        })
        .collect();

    let date_width = rows.iter().map(|r| r.1.chars().count()).max().unwrap_or(4).max(4);
    let title_width = rows.iter().map(|r| r.2.chars().count()).max().unwrap_or(5).max(5);
    let mood_width = rows.iter().map(|r| r.3.chars().count()).max().unwrap_or(4).max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<date_width$}  {:<title_width$}  {:<mood_width$}  {}\n",
        "ID", "Date", "Title", "Mood", "Tags",
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<date_width$}  {:-<title_width$}  {:-<mood_width$}  {:-<4}\n",
        "", "", "", "", "",
    ));

    for (id, date, title, mood, tags) in &rows {
        output.push_str(&format!(
            "{:<12}  {:<date_width$}  {:<title_width$}  {:<mood_width$}  {}\n",
            id, date, title, mood, tags,
        ));
    }

    output.push_str(&format!(
        "\n{} {}\n",
        rows.len(),
        if rows.len() == 1 { "entry" } else { "entries" }
    ));
    output
}

/// Format a decrypted entry in full
pub fn format_entry_details(entry: &DecryptedEntry, settings: &Settings) -> String {
    let summary = &entry.summary;
    let mut output = String::new();

    output.push_str(&format!("{}\n", summary.title));
    output.push_str(&format!("  ID:       {}\n", summary.id));
    if let Some(mood) = &summary.mood {
        output.push_str(&format!("  Mood:     {}\n", mood));
    }
    if !summary.tags.is_empty() {
        output.push_str(&format!("  Tags:     {}\n", summary.tags.join(", ")));
    }
    output.push_str(&format!(
        "  Created:  {}\n",
        summary.created_at.format(&settings.datetime_format)
    ));
    if summary.updated_at != summary.created_at {
        output.push_str(&format!(
            "  Modified: {}\n",
            summary.updated_at.format(&settings.datetime_format)
        ));
    }

    output.push('\n');
    output.push_str(&entry.content);
    if !entry.content.ends_with('\n') {
        output.push('\n');
    }

    output
}

/// Shorten to `max` characters, marking the cut with an ellipsis
fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max - 1).collect();
        format!("{}…", head)
    }
}
