//! YAML export
//!
//! Same content as the JSON export, in a format easier to read by eye.

use std::io::Write;

use crate::error::{PureNoteError, PureNoteResult};
use crate::export::json::DiaryExport;
use crate::models::User;
use crate::storage::Storage;

/// Write a user's full export as YAML with a short header
pub fn export_user_yaml<W: Write>(
    storage: &Storage,
    user: &User,
    writer: &mut W,
) -> PureNoteResult<()> {
    let export = DiaryExport::from_storage(storage, user)?;
    export.validate().map_err(PureNoteError::Export)?;

    let to_export_err = |e: std::io::Error| PureNoteError::Export(e.to_string());

    writeln!(writer, "# PureNote diary export for {}", export.user.username)
        .map_err(to_export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(to_export_err)?;
    writeln!(writer, "# Entry bodies are encrypted; open them with your content password.")
        .map_err(to_export_err)?;
    writeln!(writer).map_err(to_export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| PureNoteError::Export(e.to_string()))?;

    Ok(())
}
