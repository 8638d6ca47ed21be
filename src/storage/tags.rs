//! Tag repository for JSON storage
//!
//! Manages loading and saving tags to tags.json. Names are indexed per
//! owner, case-insensitively.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PureNoteError;
use crate::models::{Tag, TagId, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TagData {
    tags: Vec<Tag>,
}

/// Repository for tag persistence
pub struct TagRepository {
    path: PathBuf,
    data: RwLock<HashMap<TagId, Tag>>,
    /// Index: (owner, normalized name) -> tag_id
    by_name: RwLock<HashMap<(UserId, String), TagId>>,
}

fn lock_err(e: impl std::fmt::Display) -> PureNoteError {
    PureNoteError::Storage(format!("Failed to acquire lock: {}", e))
}

impl TagRepository {
    /// Create a new tag repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_name: RwLock::new(HashMap::new()),
        }
    }

    /// Load tags from disk
    pub fn load(&self) -> Result<(), PureNoteError> {
        let file_data: TagData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_name = self.by_name.write().map_err(lock_err)?;

        data.clear();
        by_name.clear();

        for tag in file_data.tags {
            by_name.insert((tag.user_id, tag.normalized_name()), tag.id);
            data.insert(tag.id, tag);
        }

        Ok(())
    }

    /// Save tags to disk
    pub fn save(&self) -> Result<(), PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;

        let mut tags: Vec<_> = data.values().cloned().collect();
        tags.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.normalized_name().cmp(&b.normalized_name()))
        });

        write_json_atomic(&self.path, &TagData { tags })
    }

    /// Get a tag by ID
    pub fn get(&self, id: TagId) -> Result<Option<Tag>, PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all tags of one user, sorted by name
    pub fn get_by_user(&self, user_id: UserId) -> Result<Vec<Tag>, PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;
        let mut tags: Vec<_> = data
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tags.sort_by_key(|t| t.normalized_name());
        Ok(tags)
    }

    /// Get one of a user's tags by name (case-insensitive)
    pub fn get_by_name(&self, user_id: UserId, name: &str) -> Result<Option<Tag>, PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;
        let by_name = self.by_name.read().map_err(lock_err)?;

        Ok(by_name
            .get(&(user_id, Tag::normalize(name)))
            .and_then(|id| data.get(id).cloned()))
    }

    /// Resolve tag ids to names, skipping ids that no longer exist
    pub fn names_for(&self, ids: &[TagId]) -> Result<Vec<String>, PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(ids
            .iter()
            .filter_map(|id| data.get(id).map(|t| t.name.clone()))
            .collect())
    }

    /// Insert or update a tag
    pub fn upsert(&self, tag: Tag) -> Result<(), PureNoteError> {
        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_name = self.by_name.write().map_err(lock_err)?;

        if let Some(old) = data.get(&tag.id) {
            by_name.remove(&(old.user_id, old.normalized_name()));
        }

        by_name.insert((tag.user_id, tag.normalized_name()), tag.id);
        data.insert(tag.id, tag);
        Ok(())
    }

    /// Count tags across all users
    pub fn count(&self) -> Result<usize, PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.len())
    }
}
