//! Password input for CLI commands
//!
//! Passwords are read without echo. Each can also come from an environment
//! variable so scripts and tests can run without a terminal.

use std::env;

use crate::crypto::SecureString;
use crate::error::{PureNoteError, PureNoteResult};
use crate::models::entry::CONTENT_PASSWORD_MIN_LEN;
use crate::models::user::ACCOUNT_PASSWORD_MIN_LEN;

/// Account password for login
pub const ACCOUNT_PASSWORD_ENV: &str = "PURENOTE_PASSWORD";

/// Password that seals and opens entry content
pub const CONTENT_PASSWORD_ENV: &str = "PURENOTE_CONTENT_PASSWORD";

/// Account password, from the environment or a hidden prompt
pub fn account_password() -> PureNoteResult<SecureString> {
    from_env_or_prompt(ACCOUNT_PASSWORD_ENV, "Account password: ")
}

/// Content password, from the environment or a hidden prompt
pub fn content_password() -> PureNoteResult<SecureString> {
    from_env_or_prompt(CONTENT_PASSWORD_ENV, "Content password: ")
}

/// Account password for a new user, confirmed when typed interactively
pub fn new_account_password() -> PureNoteResult<SecureString> {
    match from_env(ACCOUNT_PASSWORD_ENV) {
        Some(password) => Ok(password),
        None => confirmed_password(
            "Choose an account password: ",
            ACCOUNT_PASSWORD_MIN_LEN,
            prompt_password,
        ),
    }
}

/// Content password that will seal a new entry, confirmed when typed
/// interactively
///
/// A mistyped content password makes the entry unreadable for good.
pub fn new_content_password() -> PureNoteResult<SecureString> {
    match from_env(CONTENT_PASSWORD_ENV) {
        Some(password) => Ok(password),
        None => confirmed_password(
            "Content password for this entry: ",
            CONTENT_PASSWORD_MIN_LEN,
            prompt_password,
        ),
    }
}

/// Ask until two readings agree and the password is long enough
fn confirmed_password<F>(prompt: &str, min_len: usize, mut read: F) -> PureNoteResult<SecureString>
where
    F: FnMut(&str) -> PureNoteResult<SecureString>,
{
    loop {
        let first = read(prompt)?;

        if first.chars().count() < min_len {
            println!(
                "Password must be at least {} characters. Please try again.",
                min_len
            );
            continue;
        }

        let second = read("Confirm password: ")?;

        if first.as_str() != second.as_str() {
            println!("Passwords do not match. Please try again.");
            continue;
        }

        return Ok(first);
    }
}

fn from_env_or_prompt(var: &str, prompt: &str) -> PureNoteResult<SecureString> {
    match from_env(var) {
        Some(password) => Ok(password),
        None => prompt_password(prompt),
    }
}

fn from_env(var: &str) -> Option<SecureString> {
    env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(SecureString::new)
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> PureNoteResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::new)
        .map_err(|e| PureNoteError::Io(format!("Failed to read password: {}", e)))
}
