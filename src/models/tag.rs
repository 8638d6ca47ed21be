//! Tag model
//!
//! Each user has their own set of tags. Within one user, tag names are
//! unique without regard to case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{TagId, UserId};

pub const TAG_NAME_MAX_LEN: usize = 50;

/// A label that can be attached to diary entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier
    pub id: TagId,

    /// Owner of the tag
    pub user_id: UserId,

    /// Tag name, stored as first entered
    pub name: String,

    /// When the tag was first used
    pub created_at: DateTime<Utc>,
}

impl Tag {
    /// Create a new tag
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            id: TagId::new(),
            user_id,
            name: name.into().trim().to_string(),
            created_at: Utc::now(),
        }
    }

    /// Key used for case-insensitive lookups
    pub fn normalized_name(&self) -> String {
        Self::normalize(&self.name)
    }

    pub fn normalize(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Validate the tag
    pub fn validate(&self) -> Result<(), TagValidationError> {
        if self.name.trim().is_empty() {
            return Err(TagValidationError::EmptyName);
        }

        let len = self.name.chars().count();
        if len > TAG_NAME_MAX_LEN {
            return Err(TagValidationError::NameTooLong(len));
        }

        Ok(())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Tag together with how many of a user's entries carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagUsage {
    pub id: TagId,
    pub name: String,
    pub entry_count: usize,
}

/// Validation errors for tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for TagValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Tag name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Tag name too long ({} chars, max {})",
                len, TAG_NAME_MAX_LEN
            ),
        }
    }
}

impl std::error::Error for TagValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tag_trims() {
        let tag = Tag::new(UserId::new(), "  Travel ");
        assert_eq!(tag.name, "Travel");
        assert_eq!(tag.normalized_name(), "travel");
        assert!(tag.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert_eq!(Tag::new(UserId::new(), "   ").validate(), Err(TagValidationError::EmptyName));
        assert_eq!(
            Tag::new(UserId::new(), "x".repeat(51)).validate(),
            Err(TagValidationError::NameTooLong(51))
        );
    }
}
