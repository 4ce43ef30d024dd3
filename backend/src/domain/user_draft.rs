//! Validated user input awaiting persistence.
//!
//! Inbound adapters parse untrusted payloads into a [`UserDraft`] and then
//! derive a [`User`] from it. The plaintext password lives only inside the
//! draft and is wiped from memory when the draft is dropped.

use zeroize::Zeroizing;

use super::password::{PasswordHashError, hash_password};
use super::user::User;

/// Reasons a user payload is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserDraftValidationError {
    /// Name was missing or blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email did not have the `local@domain` shape.
    #[error("email must contain a single @ between a local part and a domain")]
    InvalidEmail,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// User fields accepted from a caller, before credential hashing.
///
/// ## Invariants
/// - `name` and `email` are trimmed and non-empty.
/// - `email` contains exactly one `@` with text on both sides.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use user_service::domain::UserDraft;
///
/// let draft = UserDraft::try_from_parts(" Dmitry ", "123456", "os_dimay@mail.ru").unwrap();
/// assert_eq!(draft.name(), "Dmitry");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    name: String,
    password: Zeroizing<String>,
    email: String,
}

impl UserDraft {
    /// Validate raw inputs.
    pub fn try_from_parts(
        name: &str,
        password: &str,
        email: &str,
    ) -> Result<Self, UserDraftValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UserDraftValidationError::EmptyName);
        }

        let email = email.trim();
        if email.is_empty() {
            return Err(UserDraftValidationError::EmptyEmail);
        }
        if !is_plausible_email(email) {
            return Err(UserDraftValidationError::InvalidEmail);
        }

        if password.is_empty() {
            return Err(UserDraftValidationError::EmptyPassword);
        }

        Ok(Self {
            name: name.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            email: email.to_owned(),
        })
    }

    /// Trimmed display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Trimmed contact address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Hash the password and build a user without an identifier.
    pub fn into_user(self) -> Result<User, PasswordHashError> {
        let password_hash = hash_password(self.password.as_str())?;
        Ok(User::new(self.name, password_hash, self.email))
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
