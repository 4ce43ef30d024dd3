//! User data model.
//!
//! A [`User`] is built by callers without an identifier, handed to a
//! [`UserRepository`](crate::domain::ports::UserRepository) for creation, and
//! addressed by the store-assigned [`UserId`] from then on.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Opaque user identifier issued by the persistence layer.
///
/// The domain never interprets the contents; adapters own the mapping to
/// their native key format and reject identifiers they cannot parse.
///
/// # Examples
/// ```
/// use user_service::domain::UserId;
///
/// let id = UserId::new("65a1f0c2e4b0a1b2c3d4e5f6");
/// assert_eq!(id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a raw identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Application user.
///
/// ## Invariants
/// - `id` is `None` only for users that have not been persisted yet.
/// - `password_hash` is never serialised; outbound JSON carries `id`, `name`
///   and `email` only.
#[derive(Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    id: Option<UserId>,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[serde(skip)]
    password_hash: String,
    #[schema(example = "ada@example.com")]
    email: String,
}

impl User {
    /// Build a user that has not been persisted yet.
    ///
    /// # Examples
    /// ```
    /// use user_service::domain::User;
    ///
    /// let user = User::new("Ada", "$argon2id$...", "ada@example.com");
    /// assert!(user.id().is_none());
    /// ```
    pub fn new(
        name: impl Into<String>,
        password_hash: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            password_hash: password_hash.into(),
            email: email.into(),
        }
    }

    /// Attach the identifier of the stored document.
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Replace the contact address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Store-assigned identifier, absent before creation.
    pub fn id(&self) -> Option<&UserId> {
        self.id.as_ref()
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Opaque credential material.
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }

    /// Contact address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("password_hash", &"<redacted>")
            .field("email", &self.email)
            .finish()
    }
}
