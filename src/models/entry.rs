//! Diary entry model
//!
//! Only the body of an entry is encrypted. Title, mood, tags, and timestamps
//! stay in the clear so entries can be listed and filtered without a
//! password.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{EntryId, TagId, UserId};

pub const TITLE_MAX_LEN: usize = 200;
pub const MOOD_MAX_LEN: usize = 50;
pub const MAX_TAGS_PER_ENTRY: usize = 20;
pub const CONTENT_PASSWORD_MIN_LEN: usize = 6;

/// A stored diary entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryEntry {
    /// Unique identifier
    pub id: EntryId,

    /// Owner of the entry
    pub user_id: UserId,

    /// Plaintext title
    pub title: String,

    /// Sealed body (base64 nonce || tag || ciphertext)
    pub encrypted_content: String,

    /// Optional free-form mood label
    #[serde(default)]
    pub mood: Option<String>,

    /// Tags attached to this entry
    #[serde(default)]
    pub tag_ids: Vec<TagId>,

    /// When the entry was written
    pub created_at: DateTime<Utc>,

    /// When the entry was last modified
    pub updated_at: DateTime<Utc>,
}

impl DiaryEntry {
    /// Create a new entry around an already-sealed body
    pub fn new(user_id: UserId, title: impl Into<String>, encrypted_content: String) -> Self {
        let now = Utc::now();
        Self {
            id: EntryId::new(),
            user_id,
            title: title.into(),
            encrypted_content,
            mood: None,
            tag_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether this entry belongs to the given user
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Validate the stored fields
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_title(&self.title)?;
        validate_mood(self.mood.as_deref())?;

        if self.tag_ids.len() > MAX_TAGS_PER_ENTRY {
            return Err(EntryValidationError::TooManyTags(self.tag_ids.len()));
        }

        if self.encrypted_content.is_empty() {
            return Err(EntryValidationError::MissingContent);
        }

        Ok(())
    }
}

impl fmt::Display for DiaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.created_at.format("%Y-%m-%d"))
    }
}

/// User-supplied fields for creating or replacing an entry
#[derive(Debug, Clone, Default)]
pub struct EntryInput {
    pub title: String,
    pub content: String,
    pub mood: Option<String>,
    pub tags: Vec<String>,
}

impl EntryInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Validate the input before anything is encrypted
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_title(&self.title)?;
        validate_mood(self.mood.as_deref())?;

        let tag_count = self.tags.iter().filter(|t| !t.trim().is_empty()).count();
        if tag_count > MAX_TAGS_PER_ENTRY {
            return Err(EntryValidationError::TooManyTags(tag_count));
        }

        for tag in &self.tags {
            let len = tag.trim().chars().count();
            if len > super::tag::TAG_NAME_MAX_LEN {
                return Err(EntryValidationError::TagTooLong(len));
            }
        }

        Ok(())
    }
}

/// Check a content password before it is used for encryption
pub fn validate_content_password(password: &str) -> Result<(), EntryValidationError> {
    if password.is_empty() {
        return Err(EntryValidationError::MissingContentPassword);
    }
    if password.chars().count() < CONTENT_PASSWORD_MIN_LEN {
        return Err(EntryValidationError::ContentPasswordTooShort);
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<(), EntryValidationError> {
    if title.trim().is_empty() {
        return Err(EntryValidationError::EmptyTitle);
    }
    let len = title.chars().count();
    if len > TITLE_MAX_LEN {
        return Err(EntryValidationError::TitleTooLong(len));
    }
    Ok(())
}

fn validate_mood(mood: Option<&str>) -> Result<(), EntryValidationError> {
    if let Some(mood) = mood {
        let len = mood.chars().count();
        if len > MOOD_MAX_LEN {
            return Err(EntryValidationError::MoodTooLong(len));
        }
    }
    Ok(())
}

/// Metadata of an entry, without its body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySummary {
    pub id: EntryId,
    pub title: String,
    pub mood: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An entry with its body decrypted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptedEntry {
    pub summary: EntrySummary,
    pub content: String,
}

/// Criteria for narrowing a user's entries
///
/// Every populated field must match. Date bounds are inclusive and compare
/// the calendar day (UTC) of `created_at`.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub mood: Option<String>,
    pub tags: Vec<String>,
    pub title_contains: Option<String>,
}

impl EntryFilter {
    /// Match against the date, mood, and title criteria
    ///
    /// Tag matching needs the tag names and is done by the caller through
    /// [`EntryFilter::matches_tags`].
    pub fn matches(&self, entry: &DiaryEntry) -> bool {
        let day = entry.created_at.date_naive();

        if self.from.is_some_and(|from| day < from) {
            return false;
        }
        if self.to.is_some_and(|to| day > to) {
            return false;
        }

        if let Some(mood) = &self.mood {
            if entry.mood.as_deref() != Some(mood.as_str()) {
                return false;
            }
        }

        if let Some(needle) = &self.title_contains {
            if !entry.title.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }

        true
    }

    /// True when no tags were requested or the entry has any of them
    pub fn matches_tags(&self, entry_tags: &[String]) -> bool {
        if self.tags.is_empty() {
            return true;
        }
        self.tags.iter().any(|wanted| {
            entry_tags
                .iter()
                .any(|have| have.eq_ignore_ascii_case(wanted.trim()))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none()
            && self.to.is_none()
            && self.mood.is_none()
            && self.tags.is_empty()
            && self.title_contains.is_none()
    }
}

/// Validation errors for diary entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyTitle,
    TitleTooLong(usize),
    MoodTooLong(usize),
    TooManyTags(usize),
    TagTooLong(usize),
    MissingContent,
    MissingContentPassword,
    ContentPasswordTooShort,
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Title is required"),
            Self::TitleTooLong(len) => {
                write!(f, "Title too long ({} chars, max {})", len, TITLE_MAX_LEN)
            }
            Self::MoodTooLong(len) => {
                write!(f, "Mood too long ({} chars, max {})", len, MOOD_MAX_LEN)
            }
            Self::TooManyTags(count) => {
                write!(f, "Too many tags ({}, max {})", count, MAX_TAGS_PER_ENTRY)
            }
            Self::TagTooLong(len) => write!(
                f,
                "Tag too long ({} chars, max {})",
                len,
                super::tag::TAG_NAME_MAX_LEN
            ),
            Self::MissingContent => write!(f, "Entry has no encrypted content"),
            Self::MissingContentPassword => write!(f, "Content password is required"),
            Self::ContentPasswordTooShort => write!(
                f,
                "Content password must be at least {} characters",
                CONTENT_PASSWORD_MIN_LEN
            ),
        }
    }
}

impl std::error::Error for EntryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_entry() -> DiaryEntry {
        let mut entry = DiaryEntry::new(UserId::new(), "Monday", "c2VhbGVk".to_string());
        entry.created_at = Utc.with_ymd_and_hms(2024, 3, 10, 23, 30, 0).unwrap();
        entry.mood = Some("calm".into());
        entry
    }

    #[test]
    fn test_new_entry() {
        let entry = test_entry();
        assert_eq!(entry.title, "Monday");
        assert!(entry.tag_ids.is_empty());
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_ownership() {
        let entry = test_entry();
        assert!(entry.is_owned_by(entry.user_id));
        assert!(!entry.is_owned_by(UserId::new()));
    }

    #[test]
    fn test_input_validation() {
        assert!(EntryInput::new("Title", "body").validate().is_ok());
        assert!(EntryInput::new("Title", "").validate().is_ok());

        assert_eq!(
            EntryInput::new("   ", "body").validate(),
            Err(EntryValidationError::EmptyTitle)
        );
        assert_eq!(
            EntryInput::new("x".repeat(201), "body").validate(),
            Err(EntryValidationError::TitleTooLong(201))
        );
        assert!(EntryInput::new("x".repeat(200), "body").validate().is_ok());

        let input = EntryInput::new("Title", "body").with_mood("m".repeat(51));
        assert_eq!(input.validate(), Err(EntryValidationError::MoodTooLong(51)));
    }

    #[test]
    fn test_tag_limits() {
        let tags: Vec<String> = (0..21).map(|i| format!("tag{}", i)).collect();
        let input = EntryInput::new("Title", "body").with_tags(tags);
        assert_eq!(input.validate(), Err(EntryValidationError::TooManyTags(21)));

        let input = EntryInput::new("Title", "body").with_tags(["t".repeat(51)]);
        assert_eq!(input.validate(), Err(EntryValidationError::TagTooLong(51)));

        // Blank tags are dropped later and do not count
        let mut tags: Vec<String> = (0..20).map(|i| format!("tag{}", i)).collect();
        tags.push("  ".into());
        assert!(EntryInput::new("Title", "body").with_tags(tags).validate().is_ok());
    }

    #[test]
    fn test_content_password_validation() {
        assert_eq!(
            validate_content_password(""),
            Err(EntryValidationError::MissingContentPassword)
        );
        assert_eq!(
            validate_content_password("12345"),
            Err(EntryValidationError::ContentPasswordTooShort)
        );
        assert!(validate_content_password("123456").is_ok());
    }

    #[test]
    fn test_filter_dates_are_inclusive_days() {
        let entry = test_entry();
        let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let filter = EntryFilter {
            from: Some(day),
            to: Some(day),
            ..Default::default()
        };
        assert!(filter.matches(&entry));

        let filter = EntryFilter {
            from: NaiveDate::from_ymd_opt(2024, 3, 11),
            ..Default::default()
        };
        assert!(!filter.matches(&entry));

        let filter = EntryFilter {
            to: NaiveDate::from_ymd_opt(2024, 3, 9),
            ..Default::default()
        };
        assert!(!filter.matches(&entry));
    }

    #[test]
    fn test_filter_mood_and_title() {
        let entry = test_entry();

        let filter = EntryFilter {
            mood: Some("calm".into()),
            title_contains: Some("MON".into()),
            ..Default::default()
        };
        assert!(filter.matches(&entry));

        let filter = EntryFilter {
            mood: Some("Calm".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&entry));
    }

    #[test]
    fn test_filter_tags_any_of() {
        let filter = EntryFilter {
            tags: vec!["work".into(), "travel".into()],
            ..Default::default()
        };
        assert!(filter.matches_tags(&["Travel".to_string()]));
        assert!(!filter.matches_tags(&["home".to_string()]));
        assert!(!filter.matches_tags(&[]));

        assert!(EntryFilter::default().matches_tags(&[]));
        assert!(EntryFilter::default().is_empty());
    }
}
