//! Credential hashing for stored users.
//!
//! Plaintext passwords only exist in inbound request payloads. They are
//! turned into Argon2id PHC strings before a [`User`](crate::domain::User)
//! is built. Nothing in this service verifies them.

use argon2::Argon2;
use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};

/// Errors raised while deriving credential material.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The hasher rejected the input or parameters.
    #[error("password hashing failed: {message}")]
    Hashing {
        /// Hasher error text.
        message: String,
    },
}

/// Derive an Argon2id PHC string from `plaintext` with a random salt.
///
/// # Examples
/// ```
/// use user_service::domain::hash_password;
///
/// let hash = hash_password("123456").expect("hashing succeeds");
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(plaintext: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordHashError::Hashing {
            message: err.to_string(),
        })
}
