//! Configuration module for PureNote
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PureNotePaths;
pub use settings::Settings;
