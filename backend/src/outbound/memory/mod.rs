//! In-process `UserRepository` used by tests and local runs without MongoDB.
//!
//! Issues the same 24-character hexadecimal `ObjectId` identifiers as the
//! MongoDB adapter and reports the same error kinds, so code exercised
//! against it behaves identically against the real store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

/// Stored fields of a user, keyed externally by identifier.
#[derive(Debug, Clone)]
struct StoredUser {
    name: String,
    password_hash: String,
    email: String,
}

impl StoredUser {
    fn from_user(user: &User) -> Self {
        Self {
            name: user.name().to_owned(),
            password_hash: user.password_hash().to_owned(),
            email: user.email().to_owned(),
        }
    }

    fn to_user(&self, id: ObjectId) -> User {
        User::new(
            self.name.clone(),
            self.password_hash.clone(),
            self.email.clone(),
        )
        .with_id(UserId::new(id.to_hex()))
    }
}

/// Thread-safe map-backed repository.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<ObjectId, StoredUser>>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    ///
    /// # Errors
    ///
    /// Returns [`UserPersistenceError::Query`] when a writer panicked while
    /// holding the lock, exactly as the repository operations do.
    pub fn len(&self) -> Result<usize, UserPersistenceError> {
        self.users.read().map(|users| users.len()).map_err(poisoned)
    }

    /// Whether no users are stored.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`InMemoryUserRepository::len`].
    pub fn is_empty(&self) -> Result<bool, UserPersistenceError> {
        self.len().map(|len| len == 0)
    }
}

fn parse_id(id: &UserId) -> Result<ObjectId, UserPersistenceError> {
    ObjectId::parse_str(id.as_str())
        .map_err(|_| UserPersistenceError::invalid_identifier(id.as_str()))
}

fn poisoned<T>(_: T) -> UserPersistenceError {
    UserPersistenceError::query("in-memory user store lock poisoned")
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<UserId, UserPersistenceError> {
        let id = ObjectId::new();
        self.users
            .write()
            .map_err(poisoned)?
            .insert(id, StoredUser::from_user(user));
        Ok(UserId::new(id.to_hex()))
    }

    async fn find_one(&self, id: &UserId) -> Result<User, UserPersistenceError> {
        let key = parse_id(id)?;
        self.users
            .read()
            .map_err(poisoned)?
            .get(&key)
            .map(|stored| stored.to_user(key))
            .ok_or_else(|| UserPersistenceError::not_found(id.as_str()))
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let id = user
            .id()
            .ok_or_else(|| UserPersistenceError::invalid_identifier("<none>"))?;
        let key = parse_id(id)?;
        let mut users = self.users.write().map_err(poisoned)?;
        let stored = users
            .get_mut(&key)
            .ok_or_else(|| UserPersistenceError::not_found(id.as_str()))?;
        *stored = StoredUser::from_user(user);
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError> {
        let key = parse_id(id)?;
        self.users
            .write()
            .map_err(poisoned)?
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| UserPersistenceError::not_found(id.as_str()))
    }
}
