//! Tag service

use std::collections::HashSet;

use tracing::debug;

use crate::audit::EntityType;
use crate::error::{PureNoteError, PureNoteResult};
use crate::models::{Tag, TagUsage, UserId};
use crate::storage::Storage;

/// Service for tag management
pub struct TagService<'a> {
    storage: &'a Storage,
}

impl<'a> TagService<'a> {
    /// Create a new tag service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Resolve tag names to the user's tags, creating the missing ones
    ///
    /// Names are trimmed, blanks dropped, and duplicates (ignoring case)
    /// collapsed to the first spelling. The returned tags follow input order.
    pub fn get_or_create(&self, names: &[String], user_id: UserId) -> PureNoteResult<Vec<Tag>> {
        let mut seen = HashSet::new();
        let mut tags = Vec::new();
        let mut created = Vec::new();

        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            if !seen.insert(Tag::normalize(name)) {
                continue;
            }

            if let Some(existing) = self.storage.tags.get_by_name(user_id, name)? {
                tags.push(existing);
                continue;
            }

            let tag = Tag::new(user_id, name);
            tag.validate()
                .map_err(|e| PureNoteError::Validation(e.to_string()))?;

            self.storage.tags.upsert(tag.clone())?;
            created.push(tag.clone());
            tags.push(tag);
        }

        if !created.is_empty() {
            self.storage.tags.save()?;
            for tag in &created {
                self.storage.log_create(
                    user_id,
                    EntityType::Tag,
                    tag.id.to_string(),
                    Some(tag.name.clone()),
                    tag,
                )?;
            }
            debug!(count = created.len(), "Created tags");
        }

        Ok(tags)
    }

    /// All of a user's tags with the number of entries carrying each
    pub fn list_with_counts(&self, user_id: UserId) -> PureNoteResult<Vec<TagUsage>> {
        self.storage
            .tags
            .get_by_user(user_id)?
            .into_iter()
            .map(|tag| {
                let entry_count = self.storage.entries.get_by_tag(tag.id)?.len();
                Ok(TagUsage {
                    id: tag.id,
                    name: tag.name,
                    entry_count,
                })
            })
            .collect()
    }
}
