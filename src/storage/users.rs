//! User repository for JSON storage
//!
//! Manages loading and saving users to users.json. Usernames and emails are
//! indexed case-insensitively for login lookups.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PureNoteError;
use crate::models::{User, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, User>>,
    /// Index: normalized username -> user_id
    by_username: RwLock<HashMap<String, UserId>>,
    /// Index: normalized email -> user_id
    by_email: RwLock<HashMap<String, UserId>>,
}

fn lock_err(e: impl std::fmt::Display) -> PureNoteError {
    PureNoteError::Storage(format!("Failed to acquire lock: {}", e))
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_username: RwLock::new(HashMap::new()),
            by_email: RwLock::new(HashMap::new()),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> Result<(), PureNoteError> {
        let file_data: UserData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_username = self.by_username.write().map_err(lock_err)?;
        let mut by_email = self.by_email.write().map_err(lock_err)?;

        data.clear();
        by_username.clear();
        by_email.clear();

        for user in file_data.users {
            by_username.insert(User::normalize_identifier(&user.username), user.id);
            by_email.insert(User::normalize_identifier(&user.email), user.id);
            data.insert(user.id, user);
        }

        Ok(())
    }

    /// Save users to disk
    pub fn save(&self) -> Result<(), PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        write_json_atomic(&self.path, &UserData { users })
    }

    /// Get a user by ID
    pub fn get(&self, id: UserId) -> Result<Option<User>, PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all users
    pub fn get_all(&self) -> Result<Vec<User>, PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;
        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by(|a, b| a.username.to_lowercase().cmp(&b.username.to_lowercase()));
        Ok(users)
    }

    /// Get a user by username (case-insensitive)
    pub fn get_by_username(&self, username: &str) -> Result<Option<User>, PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;
        let by_username = self.by_username.read().map_err(lock_err)?;

        Ok(by_username
            .get(&User::normalize_identifier(username))
            .and_then(|id| data.get(id).cloned()))
    }

    /// Get a user by email (case-insensitive)
    pub fn get_by_email(&self, email: &str) -> Result<Option<User>, PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;
        let by_email = self.by_email.read().map_err(lock_err)?;

        Ok(by_email
            .get(&User::normalize_identifier(email))
            .and_then(|id| data.get(id).cloned()))
    }

    /// Insert or update a user
    ///
    /// An existing user's encryption salt can never change: every entry they
    /// own was sealed under it.
    pub fn upsert(&self, user: User) -> Result<(), PureNoteError> {
        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_username = self.by_username.write().map_err(lock_err)?;
        let mut by_email = self.by_email.write().map_err(lock_err)?;

        if let Some(old) = data.get(&user.id) {
            if old.encryption_salt != user.encryption_salt {
                return Err(PureNoteError::Storage(format!(
                    "Refusing to change the encryption salt of user {}",
                    user.id
                )));
            }
            by_username.remove(&User::normalize_identifier(&old.username));
            by_email.remove(&User::normalize_identifier(&old.email));
        }

        by_username.insert(User::normalize_identifier(&user.username), user.id);
        by_email.insert(User::normalize_identifier(&user.email), user.id);
        data.insert(user.id, user);
        Ok(())
    }

    /// Count users
    pub fn count(&self) -> Result<usize, PureNoteError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, UserRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = UserRepository::new(temp_dir.path().join("users.json"));
        (temp_dir, repo)
    }

    fn test_user(name: &str) -> User {
        User::new(name, format!("{}@example.com", name), "hash", "c2FsdA==")
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_lookup_by_username_and_email() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let user = test_user("Alice");
        let id = user.id;
        repo.upsert(user).unwrap();

        assert_eq!(repo.get_by_username("alice").unwrap().unwrap().id, id);
        assert_eq!(repo.get_by_email("ALICE@example.com").unwrap().unwrap().id, id);
        assert!(repo.get_by_username("bob").unwrap().is_none());
    }

    #[test]
    fn test_rename_updates_index() {
        let (_temp_dir, repo) = create_test_repo();
        let mut user = test_user("alice");
        repo.upsert(user.clone()).unwrap();

        user.username = "alicia".into();
        repo.upsert(user).unwrap();

        assert!(repo.get_by_username("alice").unwrap().is_none());
        assert!(repo.get_by_username("alicia").unwrap().is_some());
    }

    #[test]
    fn test_salt_is_immutable() {
        let (_temp_dir, repo) = create_test_repo();
        let mut user = test_user("alice");
        repo.upsert(user.clone()).unwrap();

        user.encryption_salt = "b3RoZXI=".into();
        let result = repo.upsert(user.clone());
        assert!(matches!(result, Err(PureNoteError::Storage(_))));

        let stored = repo.get(user.id).unwrap().unwrap();
        assert_eq!(stored.encryption_salt, "c2FsdA==");
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let user = test_user("alice");
        let id = user.id;
        repo.upsert(user).unwrap();
        repo.save().unwrap();

        let repo2 = UserRepository::new(temp_dir.path().join("users.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get(id).unwrap().unwrap().username, "alice");
        assert!(repo2.get_by_email("alice@example.com").unwrap().is_some());
    }
}
