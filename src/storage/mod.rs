//! Storage layer for PureNote
//!
//! Provides JSON file storage with atomic writes and the audit trail that
//! services write through.

pub mod entries;
pub mod file_io;
pub mod init;
pub mod tags;
pub mod users;

pub use entries::EntryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use tags::TagRepository;
pub use users::UserRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::PureNotePaths;
use crate::error::PureNoteError;
use crate::models::UserId;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: PureNotePaths,
    audit: AuditLogger,
    audit_enabled: bool,
    pub users: UserRepository,
    pub entries: EntryRepository,
    pub tags: TagRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: PureNotePaths) -> Result<Self, PureNoteError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            audit_enabled: true,
            users: UserRepository::new(paths.users_file()),
            entries: EntryRepository::new(paths.entries_file()),
            tags: TagRepository::new(paths.tags_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &PureNotePaths {
        &self.paths
    }

    /// Turn audit logging on or off (follows the `audit_enabled` setting)
    pub fn set_audit_enabled(&mut self, enabled: bool) {
        self.audit_enabled = enabled;
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), PureNoteError> {
        self.users.load()?;
        self.entries.load()?;
        self.tags.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), PureNoteError> {
        self.users.save()?;
        self.entries.save()?;
        self.tags.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a create operation in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        user_id: UserId,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), PureNoteError> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit.log(&AuditEntry::create(
            entity_type,
            entity_id,
            entity_name,
            entity,
        )
        .by_user(user_id))
    }

    /// Record an update operation in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        user_id: UserId,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), PureNoteError> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        )
        .by_user(user_id))
    }

    /// Record a delete operation in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        user_id: UserId,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), PureNoteError> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit.log(&AuditEntry::delete(
            entity_type,
            entity_id,
            entity_name,
            entity,
        )
        .by_user(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PureNotePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_audit_toggle() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PureNotePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        let user = UserId::new();

        storage
            .log_create(user, EntityType::Tag, "tag-1".into(), None, &json!({"name": "a"}))
            .unwrap();
        assert_eq!(storage.audit().entry_count().unwrap(), 1);
        assert_eq!(storage.audit().read_for_user(user).unwrap().len(), 1);

        storage.set_audit_enabled(false);
        storage
            .log_delete(user, EntityType::Tag, "tag-1".into(), None, &json!({"name": "a"}))
            .unwrap();
        assert_eq!(storage.audit().entry_count().unwrap(), 1);
    }
}
