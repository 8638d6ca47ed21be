//! Diary entry repository for JSON storage
//!
//! Manages loading and saving entries to entries.json, with an index from
//! owner to entry ids.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PureNoteError;
use crate::models::{DiaryEntry, EntryId, TagId, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct EntryData {
    entries: Vec<DiaryEntry>,
}

/// Repository for diary entry persistence
pub struct EntryRepository {
    path: PathBuf,
    data: RwLock<HashMap<EntryId, DiaryEntry>>,
    /// Index: user_id -> entry_ids
    by_user: RwLock<HashMap<UserId, Vec<EntryId>>>,
}

fn lock_err(e: impl std::fmt::Display) -> PureNoteError {
    PureNoteError::Storage(format!("Failed to acquire lock: {}", e))
}

/// Newest first; ties broken by id so the order is stable
fn sort_newest_first(entries: &mut [DiaryEntry]) {
    entries.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

impl EntryRepository {
    /// Create a new entry repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    /// Load entries from disk
    pub fn load(&self) -> Result<(), PureNoteError> {
        let file_data: EntryData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_user = self.by_user.write().map_err(lock_err)?;

        data.clear();
        by_user.clear();

        for entry in file_data.entries {
            by_user.entry(entry.user_id).or_default().push(entry.id);
            data.insert(entry.id, entry);
        }

        Ok(())
    }

    /// Save entries to disk
    pub fn save(&self) -> Result<(), PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;

        let mut entries: Vec<_> = data.values().cloned().collect();
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        write_json_atomic(&self.path, &EntryData { entries })
    }

    /// Get an entry by ID
    pub fn get(&self, id: EntryId) -> Result<Option<DiaryEntry>, PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all entries, newest first
    pub fn get_all(&self) -> Result<Vec<DiaryEntry>, PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;
        let mut entries: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    /// Get all entries of one user, newest first
    pub fn get_by_user(&self, user_id: UserId) -> Result<Vec<DiaryEntry>, PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;
        let by_user = self.by_user.read().map_err(lock_err)?;

        let mut entries: Vec<_> = by_user
            .get(&user_id)
            .map(|ids| ids.iter().filter_map(|id| data.get(id).cloned()).collect())
            .unwrap_or_default();

        sort_newest_first(&mut entries);
        Ok(entries)
    }

    /// Get every entry that carries the given tag, across all users
    pub fn get_by_tag(&self, tag_id: TagId) -> Result<Vec<DiaryEntry>, PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;

        let mut entries: Vec<_> = data
            .values()
            .filter(|e| e.tag_ids.contains(&tag_id))
            .cloned()
            .collect();

        sort_newest_first(&mut entries);
        Ok(entries)
    }

    /// Insert or update an entry
    pub fn upsert(&self, entry: DiaryEntry) -> Result<(), PureNoteError> {
        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_user = self.by_user.write().map_err(lock_err)?;

        if let Some(old) = data.get(&entry.id) {
            if old.user_id != entry.user_id {
                if let Some(ids) = by_user.get_mut(&old.user_id) {
                    ids.retain(|&id| id != entry.id);
                }
            }
        }

        let ids = by_user.entry(entry.user_id).or_default();
        if !ids.contains(&entry.id) {
            ids.push(entry.id);
        }

        data.insert(entry.id, entry);
        Ok(())
    }

    /// Delete an entry
    pub fn delete(&self, id: EntryId) -> Result<bool, PureNoteError> {
        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_user = self.by_user.write().map_err(lock_err)?;

        if let Some(entry) = data.remove(&id) {
            if let Some(ids) = by_user.get_mut(&entry.user_id) {
                ids.retain(|&e| e != id);
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Count entries
    pub fn count(&self) -> Result<usize, PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, EntryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = EntryRepository::new(temp_dir.path().join("entries.json"));
        (temp_dir, repo)
    }

    fn entry_at(user_id: UserId, title: &str, days_ago: i64) -> DiaryEntry {
        let mut entry = DiaryEntry::new(user_id, title, "c2VhbGVk".to_string());
        entry.created_at = Utc::now() - Duration::days(days_ago);
        entry.updated_at = entry.created_at;
        entry
    }

    #[test]
    fn test_get_by_user_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        let alice = UserId::new();
        let bob = UserId::new();

        repo.upsert(entry_at(alice, "old", 3)).unwrap();
        repo.upsert(entry_at(alice, "new", 0)).unwrap();
        repo.upsert(entry_at(alice, "middle", 1)).unwrap();
        repo.upsert(entry_at(bob, "bob's", 0)).unwrap();

        let titles: Vec<_> = repo
            .get_by_user(alice)
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["new", "middle", "old"]);
        assert_eq!(repo.get_by_user(bob).unwrap().len(), 1);
        assert!(repo.get_by_user(UserId::new()).unwrap().is_empty());
    }

    #[test]
    fn test_get_by_tag() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        let tag = TagId::new();

        let mut tagged = entry_at(user, "tagged", 0);
        tagged.tag_ids.push(tag);
        repo.upsert(tagged).unwrap();
        repo.upsert(entry_at(user, "plain", 0)).unwrap();

        let found = repo.get_by_tag(tag).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "tagged");
    }

    #[test]
    fn test_delete_clears_index() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        let entry = entry_at(user, "gone", 0);
        let id = entry.id;

        repo.upsert(entry).unwrap();
        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert!(repo.get_by_user(user).unwrap().is_empty());
    }

    #[test]
    fn test_upsert_twice_does_not_duplicate() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        let mut entry = entry_at(user, "draft", 0);

        repo.upsert(entry.clone()).unwrap();
        entry.title = "final".into();
        repo.upsert(entry).unwrap();

        let entries = repo.get_by_user(user).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "final");
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        let entry = entry_at(user, "kept", 0);
        let id = entry.id;

        repo.upsert(entry).unwrap();
        repo.save().unwrap();

        let repo2 = EntryRepository::new(temp_dir.path().join("entries.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get(id).unwrap().unwrap().title, "kept");
        assert_eq!(repo2.get_by_user(user).unwrap().len(), 1);
    }
}
