//! CLI command for exporting a user's diary
//!
//! Writes to stdout unless --output is given, so status lines go to stderr.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{PureNoteError, PureNoteResult};
use crate::export::{export_entries_csv, export_user_json, export_user_yaml};
use crate::models::User;
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON (full diary, content stays encrypted)
    Json,
    /// YAML (full diary, human-readable, content stays encrypted)
    Yaml,
    /// CSV (entry metadata only)
    Csv,
}

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the export command for an authenticated user
pub fn handle_export_command(
    storage: &Storage,
    user: &User,
    args: ExportArgs,
) -> PureNoteResult<()> {
    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                PureNoteError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(storage, user, args.format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| PureNoteError::Export(e.to_string()))?;

            eprintln!("Diary exported to: {}", path.display());
            if matches!(args.format, ExportFormat::Csv) {
                eprintln!("Note: CSV holds entry metadata only. Use JSON or YAML for a full export.");
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(storage, user, args.format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| PureNoteError::Export(e.to_string()))?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    storage: &Storage,
    user: &User,
    format: ExportFormat,
    writer: &mut W,
) -> PureNoteResult<()> {
    match format {
        ExportFormat::Json => export_user_json(storage, user, writer),
        ExportFormat::Yaml => export_user_yaml(storage, user, writer),
        ExportFormat::Csv => export_entries_csv(storage, user, writer),
    }
}
