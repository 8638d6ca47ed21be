//! Path management for PureNote
//!
//! Provides XDG-compliant path resolution for configuration, data, and the
//! audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `PURENOTE_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/purenote` or `~/.config/purenote`
//! 3. Windows: `%APPDATA%\purenote`

use std::path::PathBuf;

use crate::error::PureNoteError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "PURENOTE_DATA_DIR";

/// Manages all paths used by PureNote
#[derive(Debug, Clone)]
pub struct PureNotePaths {
    /// Base directory for all PureNote data
    base_dir: PathBuf,
}

impl PureNotePaths {
    /// Create a new PureNotePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PureNoteError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create PureNotePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/purenote/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/purenote/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to users.json
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Get the path to entries.json
    pub fn entries_file(&self) -> PathBuf {
        self.data_dir().join("entries.json")
    }

    /// Get the path to tags.json
    pub fn tags_file(&self) -> PathBuf {
        self.data_dir().join("tags.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), PureNoteError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PureNoteError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PureNoteError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if PureNote has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, PureNoteError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                PureNoteError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("purenote"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, PureNoteError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| PureNoteError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("purenote"))
}
