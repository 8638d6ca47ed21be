//! User settings for PureNote
//!
//! Display preferences and the audit toggle. Nothing here influences the
//! encryption parameters, which are compile-time constants in `crypto`.

use serde::{Deserialize, Serialize};

use super::paths::PureNotePaths;
use crate::error::PureNoteError;

/// User settings for PureNote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Date format for list views (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Timestamp format for detail views (strftime format)
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,

    /// Whether create/update/delete operations are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Maximum number of entries shown by list views
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_datetime_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

fn default_list_limit() -> usize {
    50
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            date_format: default_date_format(),
            datetime_format: default_datetime_format(),
            audit_enabled: default_audit_enabled(),
            list_limit: default_list_limit(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PureNotePaths) -> Result<Self, PureNoteError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                PureNoteError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PureNoteError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PureNotePaths) -> Result<(), PureNoteError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            PureNoteError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            PureNoteError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
