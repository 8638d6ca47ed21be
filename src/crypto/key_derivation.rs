//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Turns a content password and a user's salt into the 32-byte AES-256 key.
//! The iteration count is fixed: every envelope ever written must stay
//! decryptable with the same (password, salt) pair.

use std::fmt;

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use base64::{engine::general_purpose::STANDARD, Engine};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::CryptoError;

/// PBKDF2 iteration count (OWASP 2023 floor for HMAC-SHA256)
pub const PBKDF2_ITERATIONS: u32 = 600_000;

/// Derived key size in bytes (AES-256)
pub const KEY_SIZE: usize = 32;

/// Per-user salt size in bytes
pub const SALT_SIZE: usize = 32;

/// A derived encryption key, wiped from memory on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }

    #[cfg(test)]
    pub(crate) fn from_bytes(key: [u8; KEY_SIZE]) -> Self {
        Self { key }
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Generate a fresh per-user salt, base64-encoded
///
/// Called once when an account is created. The result is stored on the user
/// record and must never be regenerated for that user.
pub fn generate_salt() -> String {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    STANDARD.encode(salt)
}

/// Decode a base64 salt, requiring exactly [`SALT_SIZE`] bytes
pub fn decode_salt(salt_encoded: &str) -> Result<[u8; SALT_SIZE], CryptoError> {
    let bytes = STANDARD
        .decode(salt_encoded)
        .map_err(|e| CryptoError::MalformedSalt(format!("invalid base64: {}", e)))?;

    <[u8; SALT_SIZE]>::try_from(bytes.as_slice()).map_err(|_| {
        CryptoError::MalformedSalt(format!(
            "expected {} bytes, got {}",
            SALT_SIZE,
            bytes.len()
        ))
    })
}

/// Derive the content key for `password` under `salt_encoded`
pub fn derive_key(password: &str, salt_encoded: &str) -> Result<DerivedKey, CryptoError> {
    let salt = decode_salt(salt_encoded)?;

    let mut key = DerivedKey {
        key: [0u8; KEY_SIZE],
    };
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, PBKDF2_ITERATIONS, &mut key.key);

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_salt() {
        let salt = generate_salt();
        let decoded = decode_salt(&salt).unwrap();
        assert_eq!(decoded.len(), SALT_SIZE);
    }

    #[test]
    fn test_salts_are_unique() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn test_same_inputs_same_key() {
        let salt = generate_salt();
        let key1 = derive_key("correct-horse", &salt).unwrap();
        let key2 = derive_key("correct-horse", &salt).unwrap();
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_password_different_key() {
        let salt = generate_salt();
        let key1 = derive_key("correct-horse", &salt).unwrap();
        let key2 = derive_key("wrong-horse", &salt).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("correct-horse", &generate_salt()).unwrap();
        let key2 = derive_key("correct-horse", &generate_salt()).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_known_vector() {
        // PBKDF2-HMAC-SHA256("password", 32 zero bytes, 600000, 32)
        let expected: [u8; KEY_SIZE] = [
            0x93, 0x0f, 0xd1, 0x53, 0x08, 0xa6, 0xcf, 0x87, 0x4c, 0x9e, 0x68, 0x98, 0xb0, 0xc7,
            0x2a, 0xc7, 0xfa, 0x22, 0xcc, 0xec, 0x93, 0x23, 0x06, 0xed, 0xbc, 0x81, 0x9c, 0xf6,
            0x43, 0xef, 0xf2, 0x07,
        ];
        let salt = STANDARD.encode([0u8; SALT_SIZE]);
        let key = derive_key("password", &salt).unwrap();
        assert_eq!(key.as_bytes(), &expected);
    }

    #[test]
    fn test_empty_password_is_accepted() {
        let salt = generate_salt();
        assert!(derive_key("", &salt).is_ok());
    }

    #[test]
    fn test_invalid_base64_salt() {
        let result = derive_key("password", "not base64!!");
        assert!(matches!(result, Err(CryptoError::MalformedSalt(_))));
    }

    #[test]
    fn test_wrong_length_salt() {
        let short = STANDARD.encode([7u8; 16]);
        let result = derive_key("password", &short);
        assert!(matches!(result, Err(CryptoError::MalformedSalt(_))));

        let long = STANDARD.encode([7u8; 33]);
        let result = derive_key("password", &long);
        assert!(matches!(result, Err(CryptoError::MalformedSalt(_))));
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let key = DerivedKey::from_bytes([0xAB; KEY_SIZE]);
        let debug = format!("{:?}", key);
        assert_eq!(debug, "DerivedKey([REDACTED])");
    }
}
