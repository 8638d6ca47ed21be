//! AES-256-GCM sealing and opening of diary content
//!
//! An envelope is `base64(nonce || tag || ciphertext)`. Each seal draws a
//! fresh random nonce, so sealing the same content twice yields two different
//! envelopes that both open to the same plaintext.

use aes_gcm::aead::{rand_core::RngCore, AeadInPlace, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce, Tag};
use base64::{engine::general_purpose::STANDARD, Engine};
use zeroize::{Zeroize, Zeroizing};

use super::key_derivation::{derive_key, DerivedKey};
use super::CryptoError;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes (128 bits)
pub const TAG_SIZE: usize = 16;

/// Bytes an envelope carries on top of the ciphertext
pub const ENVELOPE_OVERHEAD: usize = NONCE_SIZE + TAG_SIZE;

/// Encrypt `plaintext` for storage
///
/// Derives the key from `password` and `salt_encoded`, seals the UTF-8 bytes
/// and returns the base64 envelope.
pub fn encrypt(plaintext: &str, password: &str, salt_encoded: &str) -> Result<String, CryptoError> {
    let key = derive_key(password, salt_encoded)?;
    let envelope = seal(plaintext.as_bytes(), &key)?;
    Ok(STANDARD.encode(envelope))
}

/// Decrypt an envelope produced by [`encrypt`]
///
/// The envelope is parsed before the (expensive) key derivation so malformed
/// input fails fast.
pub fn decrypt(envelope: &str, password: &str, salt_encoded: &str) -> Result<String, CryptoError> {
    let raw = decode_envelope(envelope)?;
    let key = derive_key(password, salt_encoded)?;
    let mut plaintext = open(&raw, &key)?;

    String::from_utf8(std::mem::take(&mut *plaintext)).map_err(|e| {
        let mut bytes = e.into_bytes();
        bytes.zeroize();
        CryptoError::MalformedEnvelope("decrypted content is not valid UTF-8".to_string())
    })
}

/// Seal raw bytes under `key`, returning `nonce || tag || ciphertext`
pub(crate) fn seal(plaintext: &[u8], key: &DerivedKey) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);

    let mut envelope = Vec::with_capacity(ENVELOPE_OVERHEAD + plaintext.len());
    envelope.extend_from_slice(&nonce_bytes);
    envelope.extend_from_slice(&[0u8; TAG_SIZE]);
    envelope.extend_from_slice(plaintext);

    let tag = cipher
        .encrypt_in_place_detached(
            Nonce::from_slice(&nonce_bytes),
            b"",
            &mut envelope[ENVELOPE_OVERHEAD..],
        )
        .map_err(|e| {
            envelope.zeroize();
            CryptoError::EncryptionFailure(e.to_string())
        })?;

    envelope[NONCE_SIZE..ENVELOPE_OVERHEAD].copy_from_slice(tag.as_slice());
    Ok(envelope)
}

/// Authenticate and decrypt `nonce || tag || ciphertext` under `key`
///
/// The working buffer is wiped if authentication fails.
pub(crate) fn open(envelope: &[u8], key: &DerivedKey) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if envelope.len() < ENVELOPE_OVERHEAD {
        return Err(too_short(envelope.len()));
    }

    let (nonce, rest) = envelope.split_at(NONCE_SIZE);
    let (tag, ciphertext) = rest.split_at(TAG_SIZE);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let mut buffer = Zeroizing::new(ciphertext.to_vec());

    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(nonce),
            b"",
            buffer.as_mut_slice(),
            Tag::from_slice(tag),
        )
        .map_err(|_| CryptoError::AuthenticationFailure)?;

    Ok(buffer)
}

/// Base64-decode an envelope and check it can hold a nonce and tag
fn decode_envelope(envelope: &str) -> Result<Vec<u8>, CryptoError> {
    let raw = STANDARD
        .decode(envelope)
        .map_err(|e| CryptoError::MalformedEnvelope(format!("invalid base64: {}", e)))?;

    if raw.len() < ENVELOPE_OVERHEAD {
        return Err(too_short(raw.len()));
    }

    Ok(raw)
}

fn too_short(len: usize) -> CryptoError {
    CryptoError::MalformedEnvelope(format!(
        "expected at least {} bytes, got {}",
        ENVELOPE_OVERHEAD, len
    ))
}
