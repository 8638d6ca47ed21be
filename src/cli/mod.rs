//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod entry;
pub mod export;
pub mod prompt;
pub mod tag;
pub mod user;

pub use audit::handle_audit_command;
pub use entry::{handle_entry_command, EntryCommands};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use tag::{handle_tag_command, TagCommands};
pub use user::{authenticate, handle_user_command, UserCommands};
