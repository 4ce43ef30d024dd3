//! Port abstraction for user persistence adapters and their errors.
//!
//! Every adapter follows the same three steps per call: translate the opaque
//! [`UserId`] into its native key, perform exactly one store operation, and
//! classify the outcome into [`UserPersistenceError`]. Adapters never retry
//! and never swallow failures.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Caller supplied an identifier the store cannot parse.
        InvalidIdentifier { id: String } => "invalid user identifier: {id}",
        /// No stored user matches the identifier.
        NotFound { id: String } => "user {id} not found",
        /// A store-assigned identifier could not be rendered as a [`UserId`].
        Encoding { message: String } => "user identifier encoding failed: {message}",
        /// A stored document could not be decoded into a [`User`].
        Decoding { message: String } => "user document decoding failed: {message}",
        /// Repository connection could not be established or was lost.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The store did not answer within the configured deadline.
        Timeout { operation: String } => "user repository {operation} timed out",
    }
}

impl UserPersistenceError {
    /// Whether the failure came from the store rather than the caller's input
    /// or the stored data.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::Query { .. } | Self::Timeout { .. }
        )
    }
}

/// Storage capability for [`User`] records.
///
/// Handlers depend on this trait only, so tests can substitute the
/// in-memory adapter or a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user and return the identifier assigned by the store.
    ///
    /// Any identifier already present on `user` is ignored.
    async fn create(&self, user: &User) -> Result<UserId, UserPersistenceError>;

    /// Fetch the user stored under `id`.
    ///
    /// Returns [`UserPersistenceError::NotFound`] when nothing matches.
    async fn find_one(&self, id: &UserId) -> Result<User, UserPersistenceError>;

    /// Replace every mutable field of the stored user addressed by `user.id()`.
    ///
    /// The identifier itself is never written. A user without an identifier
    /// is rejected with [`UserPersistenceError::InvalidIdentifier`].
    async fn update(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Remove the user stored under `id`.
    ///
    /// Returns [`UserPersistenceError::NotFound`] when nothing was removed.
    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError>;
}
