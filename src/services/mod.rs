//! Service layer for PureNote
//!
//! Business logic on top of the storage layer: validation, encryption of
//! entry content, ownership checks, and audit logging.

pub mod entry;
pub mod tag;
pub mod user;

pub use entry::EntryService;
pub use tag::TagService;
pub use user::{RegisterUser, UserService};
