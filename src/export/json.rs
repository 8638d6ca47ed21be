//! JSON export
//!
//! A per-user export with schema versioning. Entry bodies stay sealed: the
//! export carries each envelope together with the user's encryption salt, so
//! it can be opened later with the content password and nothing else.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PureNoteError, PureNoteResult};
use crate::models::{EntryId, Tag, TagId, User, UserProfile};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Everything one user owns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub user: UserProfile,
    /// Needed to re-derive content keys; not a secret on its own
    pub encryption_salt: String,
    pub tags: Vec<Tag>,
    pub entries: Vec<ExportedEntry>,
}

/// One entry as exported, body still encrypted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedEntry {
    pub id: EntryId,
    pub title: String,
    pub mood: Option<String>,
    pub tag_ids: Vec<TagId>,
    pub encrypted_content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DiaryExport {
    /// Collect a user's data from storage, oldest entry first
    pub fn from_storage(storage: &Storage, user: &User) -> PureNoteResult<Self> {
        let tags = storage.tags.get_by_user(user.id)?;

        let mut entries: Vec<_> = storage
            .entries
            .get_by_user(user.id)?
            .into_iter()
            .map(|e| ExportedEntry {
                id: e.id,
                title: e.title,
                mood: e.mood,
                tag_ids: e.tag_ids,
                encrypted_content: e.encrypted_content,
                created_at: e.created_at,
                updated_at: e.updated_at,
            })
            .collect();
        entries.reverse();

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user: user.profile(),
            encryption_salt: user.encryption_salt.clone(),
            tags,
            entries,
        })
    }

    /// Check schema version and that every tag reference resolves
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let tag_ids: HashSet<_> = self.tags.iter().map(|t| t.id).collect();
        for entry in &self.entries {
            if let Some(missing) = entry.tag_ids.iter().find(|id| !tag_ids.contains(id)) {
                return Err(format!(
                    "Entry {} references unknown tag {}",
                    entry.id, missing
                ));
            }
        }

        Ok(())
    }
}

/// Write a user's full export as pretty-printed JSON
pub fn export_user_json<W: Write>(
    storage: &Storage,
    user: &User,
    writer: &mut W,
) -> PureNoteResult<()> {
    let export = DiaryExport::from_storage(storage, user)?;
    export.validate().map_err(PureNoteError::Export)?;

    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| PureNoteError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| PureNoteError::Export(e.to_string()))?;

    Ok(())
}
