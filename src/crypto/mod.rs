//! Content encryption for PureNote
//!
//! Diary content is sealed with AES-256-GCM under a key derived from a
//! per-call content password and the user's stored salt via
//! PBKDF2-HMAC-SHA256. Nothing in this module persists key material, logs,
//! or retries; every failure is returned to the caller as a [`CryptoError`].
//!
//! The persisted form of a sealed entry is an *envelope*: the base64 encoding
//! of `nonce (12) || tag (16) || ciphertext`.

pub mod encryption;
pub mod key_derivation;
pub mod secure_memory;

use thiserror::Error;

pub use encryption::{decrypt, encrypt, ENVELOPE_OVERHEAD, NONCE_SIZE, TAG_SIZE};
pub use key_derivation::{derive_key, generate_salt, DerivedKey, KEY_SIZE, PBKDF2_ITERATIONS, SALT_SIZE};
pub use secure_memory::SecureString;

/// Failures of the encryption core
///
/// A wrong password and a tampered envelope both surface as
/// [`CryptoError::AuthenticationFailure`]; callers cannot tell them apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The salt is not valid base64 or does not decode to 32 bytes
    #[error("Malformed encryption salt: {0}")]
    MalformedSalt(String),

    /// The envelope is not valid base64 or is too short to hold nonce and tag
    #[error("Malformed encrypted content: {0}")]
    MalformedEnvelope(String),

    /// Wrong password, wrong salt, or altered envelope bytes
    #[error("Invalid encryption password or corrupted data")]
    AuthenticationFailure,

    /// The underlying cipher failed while sealing
    #[error("Encryption failed: {0}")]
    EncryptionFailure(String),
}
