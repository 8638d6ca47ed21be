//! Storage initialization
//!
//! Handles first-run setup: directories, default settings, and empty data
//! files.

use crate::config::paths::PureNotePaths;
use crate::config::settings::Settings;
use crate::error::PureNoteError;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched, so running this twice is harmless.
pub fn initialize_storage(paths: &PureNotePaths) -> Result<Settings, PureNoteError> {
    paths.ensure_directories()?;

    let settings = Settings::load_or_create(paths)?;
    if !paths.settings_file().exists() {
        settings.save(paths)?;
    }

    for (file, key) in [
        (paths.users_file(), "users"),
        (paths.entries_file(), "entries"),
        (paths.tags_file(), "tags"),
    ] {
        if !file.exists() {
            write_json_atomic(&file, &serde_json::json!({ key: [] }))?;
        }
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_files() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PureNotePaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();

        assert!(paths.is_initialized());
        assert!(paths.users_file().exists());
        assert!(paths.entries_file().exists());
        assert!(paths.tags_file().exists());

        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        assert_eq!(storage.users.count().unwrap(), 0);
    }

    #[test]
    fn test_initialize_keeps_existing_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PureNotePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.audit_enabled = false;
        settings.save(&paths).unwrap();

        let loaded = initialize_storage(&paths).unwrap();
        assert!(!loaded.audit_enabled);
    }
}
