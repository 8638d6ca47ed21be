//! Core data models for PureNote
//!
//! Users, their diary entries, and the tags shared between entries.

pub mod entry;
pub mod ids;
pub mod tag;
pub mod user;

pub use entry::{
    validate_content_password, DecryptedEntry, DiaryEntry, EntryFilter, EntryInput, EntrySummary,
    EntryValidationError,
};
pub use ids::{EntryId, TagId, UserId};
pub use tag::{Tag, TagUsage, TagValidationError};
pub use user::{User, UserProfile, UserValidationError};
