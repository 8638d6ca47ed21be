//! CSV export
//!
//! Metadata only, one row per entry, for spreadsheets. Bodies are left out
//! entirely since a spreadsheet cannot do anything with an envelope.

use std::io::Write;

use crate::error::{PureNoteError, PureNoteResult};
use crate::models::User;
use crate::services::EntryService;
use crate::storage::Storage;

/// Export a user's entries, newest first
pub fn export_entries_csv<W: Write>(
    storage: &Storage,
    user: &User,
    writer: &mut W,
) -> PureNoteResult<()> {
    let summaries = EntryService::new(storage).list(user)?;
    let to_export_err = |e: csv::Error| PureNoteError::Export(e.to_string());

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["ID", "Created", "Updated", "Title", "Mood", "Tags"])
        .map_err(to_export_err)?;

    for summary in summaries {
        csv_writer
            .write_record([
                summary.id.as_uuid().to_string(),
                summary.created_at.to_rfc3339(),
                summary.updated_at.to_rfc3339(),
                summary.title,
                summary.mood.unwrap_or_default(),
                summary.tags.join(";"),
            ])
            .map_err(to_export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| PureNoteError::Export(e.to_string()))?;
    Ok(())
}
