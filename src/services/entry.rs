//! Diary entry service
//!
//! The only layer that calls the encryption core. Every operation is scoped
//! to the calling user; an entry that exists but belongs to someone else is
//! reported as `Forbidden`.
//!
//! The content password is taken per call and never stored or logged.

use tracing::{debug, info};

use crate::audit::{generate_diff, EntityType};
use crate::crypto;
use crate::error::{PureNoteError, PureNoteResult};
use crate::models::{
    validate_content_password, DecryptedEntry, DiaryEntry, EntryFilter, EntryId, EntryInput,
    EntrySummary, User,
};
use crate::storage::Storage;

use super::tag::TagService;

/// Service for diary entries
pub struct EntryService<'a> {
    storage: &'a Storage,
}

impl<'a> EntryService<'a> {
    /// Create a new entry service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Write a new entry, sealing its content under the user's salt
    pub fn create(
        &self,
        user: &User,
        input: EntryInput,
        content_password: &str,
    ) -> PureNoteResult<DecryptedEntry> {
        validate_input(&input, content_password)?;

        let envelope = crypto::encrypt(&input.content, content_password, &user.encryption_salt)?;
        let tags = TagService::new(self.storage).get_or_create(&input.tags, user.id)?;

        let mut entry = DiaryEntry::new(user.id, input.title.trim(), envelope);
        entry.mood = normalize_mood(input.mood);
        entry.tag_ids = tags.iter().map(|t| t.id).collect();

        entry
            .validate()
            .map_err(|e| PureNoteError::Validation(e.to_string()))?;

        self.storage.entries.upsert(entry.clone())?;
        self.storage.entries.save()?;

        let summary = self.summarize(&entry)?;
        self.storage.log_create(
            user.id,
            EntityType::DiaryEntry,
            entry.id.to_string(),
            Some(entry.title.clone()),
            &summary,
        )?;

        info!(entry = %entry.id, user = %user.id, tags = entry.tag_ids.len(), "Created diary entry");
        Ok(DecryptedEntry {
            summary,
            content: input.content,
        })
    }

    /// All of a user's entries, newest first, without content
    pub fn list(&self, user: &User) -> PureNoteResult<Vec<EntrySummary>> {
        self.search(user, &EntryFilter::default())
    }

    /// A user's entries matching every populated filter field, newest first
    pub fn search(&self, user: &User, filter: &EntryFilter) -> PureNoteResult<Vec<EntrySummary>> {
        let mut results = Vec::new();

        for entry in self.storage.entries.get_by_user(user.id)? {
            if !filter.matches(&entry) {
                continue;
            }
            let summary = self.summarize(&entry)?;
            if filter.matches_tags(&summary.tags) {
                results.push(summary);
            }
        }

        debug!(user = %user.id, matched = results.len(), "Searched diary entries");
        Ok(results)
    }

    /// Fetch an entry owned by the user, without decrypting it
    pub fn get_owned(&self, user: &User, id: EntryId) -> PureNoteResult<DiaryEntry> {
        let entry = self
            .storage
            .entries
            .get(id)?
            .ok_or_else(|| PureNoteError::entry_not_found(id.to_string()))?;

        if !entry.is_owned_by(user.id) {
            return Err(PureNoteError::Forbidden(format!(
                "diary entry {} belongs to another user",
                id
            )));
        }

        Ok(entry)
    }

    /// Fetch an entry and decrypt its content
    ///
    /// A wrong content password surfaces as `Crypto(AuthenticationFailure)`.
    pub fn get_decrypted(
        &self,
        user: &User,
        id: EntryId,
        content_password: &str,
    ) -> PureNoteResult<DecryptedEntry> {
        validate_content_password(content_password)
            .map_err(|e| PureNoteError::Validation(e.to_string()))?;

        let entry = self.get_owned(user, id)?;
        let content = crypto::decrypt(
            &entry.encrypted_content,
            content_password,
            &user.encryption_salt,
        )?;

        debug!(entry = %entry.id, "Decrypted diary entry");
        Ok(DecryptedEntry {
            summary: self.summarize(&entry)?,
            content,
        })
    }

    /// Replace an entry's title, content, mood, and tags
    ///
    /// The new content is sealed under a fresh nonce. The previous content
    /// is not decrypted, so the password given here becomes the one that
    /// opens the entry from now on.
    pub fn update(
        &self,
        user: &User,
        id: EntryId,
        input: EntryInput,
        content_password: &str,
    ) -> PureNoteResult<DecryptedEntry> {
        validate_input(&input, content_password)?;

        let mut entry = self.get_owned(user, id)?;
        let before = self.summarize(&entry)?;

        let envelope = crypto::encrypt(&input.content, content_password, &user.encryption_salt)?;
        let tags = TagService::new(self.storage).get_or_create(&input.tags, user.id)?;

        entry.title = input.title.trim().to_string();
        entry.encrypted_content = envelope;
        entry.mood = normalize_mood(input.mood);
        entry.tag_ids = tags.iter().map(|t| t.id).collect();
        entry.updated_at = chrono::Utc::now();

        entry
            .validate()
            .map_err(|e| PureNoteError::Validation(e.to_string()))?;

        self.storage.entries.upsert(entry.clone())?;
        self.storage.entries.save()?;

        let after = self.summarize(&entry)?;
        let diff = match (serde_json::to_value(&before), serde_json::to_value(&after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.storage.log_update(
            user.id,
            EntityType::DiaryEntry,
            entry.id.to_string(),
            Some(entry.title.clone()),
            &before,
            &after,
            diff,
        )?;

        info!(entry = %entry.id, "Updated diary entry");
        Ok(DecryptedEntry {
            summary: after,
            content: input.content,
        })
    }

    /// Delete an entry; its tags are kept
    pub fn delete(&self, user: &User, id: EntryId) -> PureNoteResult<EntrySummary> {
        let entry = self.get_owned(user, id)?;
        let summary = self.summarize(&entry)?;

        self.storage.entries.delete(id)?;
        self.storage.entries.save()?;

        self.storage.log_delete(
            user.id,
            EntityType::DiaryEntry,
            id.to_string(),
            Some(entry.title.clone()),
            &summary,
        )?;

        info!(entry = %id, "Deleted diary entry");
        Ok(summary)
    }

    /// Resolve a user-typed identifier to one of the user's entries
    ///
    /// Accepts a full UUID, the `ent-xxxxxxxx` display form, or any unique
    /// prefix of the UUID. However the id is typed, an entry that only
    /// matches someone else's is `Forbidden`.
    pub fn find(&self, user: &User, identifier: &str) -> PureNoteResult<DiaryEntry> {
        if let Ok(id) = EntryId::parse(identifier.trim()) {
            return self.get_owned(user, id);
        }

        let (mut own, foreign): (Vec<_>, Vec<_>) = self
            .storage
            .entries
            .get_all()?
            .into_iter()
            .filter(|e| e.id.matches_prefix(identifier))
            .partition(|e| e.is_owned_by(user.id));

        match own.len() {
            0 if !foreign.is_empty() => Err(PureNoteError::Forbidden(format!(
                "diary entry {} belongs to another user",
                identifier.trim()
            ))),
            0 => Err(PureNoteError::entry_not_found(identifier)),
            1 => Ok(own.remove(0)),
            n => Err(PureNoteError::Validation(format!(
                "'{}' matches {} entries; use a longer id",
                identifier, n
            ))),
        }
    }

    /// Metadata view of an entry with tag names resolved
    pub fn summarize(&self, entry: &DiaryEntry) -> PureNoteResult<EntrySummary> {
        Ok(EntrySummary {
            id: entry.id,
            title: entry.title.clone(),
            mood: entry.mood.clone(),
            tags: self.storage.tags.names_for(&entry.tag_ids)?,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        })
    }
}

fn validate_input(input: &EntryInput, content_password: &str) -> PureNoteResult<()> {
    input
        .validate()
        .map_err(|e| PureNoteError::Validation(e.to_string()))?;
    validate_content_password(content_password)
        .map_err(|e| PureNoteError::Validation(e.to_string()))
}

fn normalize_mood(mood: Option<String>) -> Option<String> {
    mood.map(|m| m.trim().to_string()).filter(|m| !m.is_empty())
}
