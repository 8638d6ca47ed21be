//! User service
//!
//! Registration and login. Registration is the one place an encryption salt
//! is issued; it is never regenerated afterwards.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{debug, info};

use crate::audit::EntityType;
use crate::crypto::{generate_salt, SecureString};
use crate::error::{PureNoteError, PureNoteResult};
use crate::logging::Redacted;
use crate::models::user::ACCOUNT_PASSWORD_MIN_LEN;
use crate::models::{User, UserId};
use crate::storage::Storage;

/// Fields collected when signing up
#[derive(Debug)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: SecureString,
}

/// Service for user accounts
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    /// Create a new user service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new user
    pub fn register(&self, request: RegisterUser) -> PureNoteResult<User> {
        let username = request.username.trim();
        let email = request.email.trim();

        if request.password.chars().count() < ACCOUNT_PASSWORD_MIN_LEN {
            return Err(PureNoteError::Validation(format!(
                "Password must be at least {} characters",
                ACCOUNT_PASSWORD_MIN_LEN
            )));
        }

        if self.storage.users.get_by_username(username)?.is_some() {
            return Err(PureNoteError::Duplicate {
                entity_type: "User",
                identifier: username.to_string(),
            });
        }

        if self.storage.users.get_by_email(email)?.is_some() {
            return Err(PureNoteError::Duplicate {
                entity_type: "User",
                identifier: email.to_string(),
            });
        }

        let mut user = User::new(username, email, String::new(), generate_salt());
        user.first_name = non_blank(request.first_name);
        user.last_name = non_blank(request.last_name);

        user.validate()
            .map_err(|e| PureNoteError::Validation(e.to_string()))?;

        user.password_hash = hash_password(&request.password)?;

        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;

        self.storage.log_create(
            user.id,
            EntityType::User,
            user.id.to_string(),
            Some(user.username.clone()),
            &user.profile(),
        )?;

        info!(user = %user.id, "Registered user");
        Ok(user)
    }

    /// Check a username-or-email and password pair
    ///
    /// Unknown identifiers and wrong passwords give the same error.
    pub fn login(&self, identifier: &str, password: &str) -> PureNoteResult<User> {
        let Some(user) = self.find(identifier)? else {
            // Mistyped passwords often land in the identifier field
            debug!(identifier = %Redacted(identifier), "Login rejected: unknown identifier");
            return Err(PureNoteError::InvalidCredentials);
        };

        if !verify_password(&user.password_hash, password)? {
            debug!(user = %user.id, "Login rejected: wrong password");
            return Err(PureNoteError::InvalidCredentials);
        }

        debug!(user = %user.id, "Login accepted");
        Ok(user)
    }

    /// Find a user by username or email
    pub fn find(&self, identifier: &str) -> PureNoteResult<Option<User>> {
        if let Some(user) = self.storage.users.get_by_username(identifier)? {
            return Ok(Some(user));
        }
        self.storage.users.get_by_email(identifier)
    }

    /// Get a user by ID
    pub fn get(&self, id: UserId) -> PureNoteResult<Option<User>> {
        self.storage.users.get(id)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Hash an account password into an Argon2id PHC string
fn hash_password(password: &str) -> PureNoteResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PureNoteError::Storage(format!("Failed to hash password: {}", e)))
}

fn verify_password(hash: &str, password: &str) -> PureNoteResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| PureNoteError::Storage(format!("Stored password hash is invalid: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
