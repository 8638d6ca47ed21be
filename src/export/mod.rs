//! Export module for PureNote
//!
//! Exports one user's diary:
//! - JSON: machine-readable, envelopes and salt included
//! - YAML: the same content, human-readable
//! - CSV: entry metadata only (spreadsheet-compatible)
//!
//! No format ever contains decrypted content or the account password hash.

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_entries_csv;
pub use json::{export_user_json, DiaryExport, ExportedEntry, EXPORT_SCHEMA_VERSION};
pub use yaml::export_user_yaml;

#[cfg(test)]
pub(crate) mod tests {
    use crate::config::paths::PureNotePaths;
    use crate::crypto::SecureString;
    use crate::models::{EntryInput, User};
    use crate::services::{EntryService, RegisterUser, UserService};
    use crate::storage::Storage;
    use tempfile::TempDir;

    /// Storage with one user ("alice") and two entries
    pub(crate) fn seeded_storage() -> (TempDir, Storage, User) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PureNotePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let user = UserService::new(&storage)
            .register(RegisterUser {
                username: "alice".into(),
                email: "alice@example.com".into(),
                first_name: None,
                last_name: None,
                password: SecureString::new("account-pw"),
            })
            .unwrap();

        let entries = EntryService::new(&storage);
        entries
            .create(
                &user,
                EntryInput::new("First", "Dear diary, today...").with_tags(["travel"]),
                "correct-horse",
            )
            .unwrap();
        entries
            .create(
                &user,
                EntryInput::new("Second, with a comma", "More")
                    .with_mood("calm")
                    .with_tags(["travel", "work"]),
                "correct-horse",
            )
            .unwrap();

        (temp_dir, storage, user)
    }
}
