//! User model
//!
//! A diary owner. Besides the login credentials, each user carries the
//! encryption salt that every one of their diary entries is sealed under.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 25;
pub const NAME_MAX_LEN: usize = 50;
pub const ACCOUNT_PASSWORD_MIN_LEN: usize = 6;

/// A registered diary user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Login name
    pub username: String,

    /// Email address (also accepted as a login identifier)
    pub email: String,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    /// Argon2id PHC string for the account password
    pub password_hash: String,

    /// Base64 salt for content key derivation; fixed for the user's lifetime
    pub encryption_salt: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// The parts of a user that are safe to show, export, or audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user record from already-hashed credentials
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        encryption_salt: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            email: email.into(),
            first_name: None,
            last_name: None,
            password_hash: password_hash.into(),
            encryption_salt: encryption_salt.into(),
            created_at: Utc::now(),
        }
    }

    /// Public view of this user
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            created_at: self.created_at,
        }
    }

    /// Full name if either part is set
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// Validate the user
    pub fn validate(&self) -> Result<(), UserValidationError> {
        let username_len = self.username.chars().count();
        if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&username_len) {
            return Err(UserValidationError::UsernameLength(username_len));
        }

        if self.username.chars().any(char::is_whitespace) {
            return Err(UserValidationError::UsernameWhitespace);
        }

        if !is_plausible_email(&self.email) {
            return Err(UserValidationError::InvalidEmail(self.email.clone()));
        }

        for name in [&self.first_name, &self.last_name].into_iter().flatten() {
            if name.chars().count() > NAME_MAX_LEN {
                return Err(UserValidationError::NameTooLong(name.chars().count()));
            }
        }

        if self.encryption_salt.is_empty() {
            return Err(UserValidationError::MissingSalt);
        }

        Ok(())
    }

    /// Normalize a username or email for matching
    pub fn normalize_identifier(identifier: &str) -> String {
        identifier.trim().to_lowercase()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}

/// Minimal shape check: one `@`, non-empty local part, dotted domain
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split('.')
            .filter(|part| !part.is_empty())
            .count()
            >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Validation errors for users
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    UsernameLength(usize),
    UsernameWhitespace,
    InvalidEmail(String),
    NameTooLong(usize),
    MissingSalt,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UsernameLength(len) => write!(
                f,
                "Username must be {}-{} characters (got {})",
                USERNAME_MIN_LEN, USERNAME_MAX_LEN, len
            ),
            Self::UsernameWhitespace => write!(f, "Username cannot contain whitespace"),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::NameTooLong(len) => {
                write!(f, "Name too long ({} chars, max {})", len, NAME_MAX_LEN)
            }
            Self::MissingSalt => write!(f, "User has no encryption salt"),
        }
    }
}

impl std::error::Error for UserValidationError {}
