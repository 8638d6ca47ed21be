//! PureNote - an encrypted personal diary
//!
//! Diary entries are sealed with AES-256-GCM under a key derived from a
//! content password (PBKDF2-HMAC-SHA256) and a per-user salt. Only the
//! envelope is ever written to disk.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `crypto`: The encryption core (key derivation, envelopes, salts)
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Users, diary entries, tags
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `export`: JSON, YAML and CSV export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `purenote` binary
//! - `logging`: Diagnostic log setup
//!
//! # Example
//!
//! ```rust
//! use purenote::crypto::{decrypt, encrypt, generate_salt};
//!
//! let salt = generate_salt();
//! let envelope = encrypt("Dear diary, today...", "correct-horse", &salt)?;
//! assert_eq!(decrypt(&envelope, "correct-horse", &salt)?, "Dear diary, today...");
//! assert!(decrypt(&envelope, "wrong-horse", &salt).is_err());
//! # Ok::<(), purenote::crypto::CryptoError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::PureNoteError;
