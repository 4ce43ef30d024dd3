//! MongoDB-backed `UserRepository` implementation.
//!
//! Each call parses the opaque identifier into an `ObjectId`, runs exactly
//! one collection command bounded by the repository timeout, and classifies
//! the outcome. Dropping the returned future abandons the command.

use std::future::IntoFuture;
use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::{Document, doc};
use mongodb::{Collection, Database};
use tokio::time::timeout;
use tracing::{Instrument, Span, debug, info_span, trace, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

use super::documents::{
    decode_user, id_filter, parse_object_id, render_inserted_id, require_match, user_fields,
};
use super::error_mapping::map_mongo_error;

/// Default deadline applied to each collection command.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// MongoDB implementation of the [`UserRepository`] port.
///
/// Holds a cloned collection handle; clones share the driver's connection
/// pool, so the repository can be handed to every worker without locking.
///
/// # Example
///
/// ```ignore
/// let database = connect(&ConnectionConfig::new("localhost", 27017, "app")).await?;
/// let repo = MongoUserRepository::new(&database, "users")
///     .with_operation_timeout(Duration::from_secs(2));
/// let id = repo.create(&User::new("Ada", hash, "ada@example.com")).await?;
/// ```
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<Document>,
    operation_timeout: Duration,
    span: Span,
}

impl MongoUserRepository {
    /// Create a repository over `collection` in `database`.
    ///
    /// Diagnostics are emitted inside a `user_repository` span; use
    /// [`MongoUserRepository::with_span`] to supply a different one.
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            collection: database.collection::<Document>(collection),
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
            span: info_span!("user_repository", collection = %collection),
        }
    }

    /// Bound every collection command by `operation_timeout`.
    pub fn with_operation_timeout(mut self, operation_timeout: Duration) -> Self {
        self.operation_timeout = operation_timeout;
        self
    }

    /// Emit all diagnostics inside `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    async fn bounded<F, T>(
        &self,
        operation: &'static str,
        command: F,
    ) -> Result<T, UserPersistenceError>
    where
        F: IntoFuture<Output = Result<T, mongodb::error::Error>>,
    {
        match timeout(self.operation_timeout, command.into_future()).await {
            Ok(result) => result.map_err(map_mongo_error),
            Err(_) => Err(UserPersistenceError::timeout(operation)),
        }
    }
}

fn log_failure(operation: &'static str) -> impl Fn(&UserPersistenceError) {
    move |error| {
        if error.is_store_failure() {
            warn!(operation, error = %error, "user store failed");
        } else {
            debug!(operation, error = %error, "user repository operation rejected");
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: &User) -> Result<UserId, UserPersistenceError> {
        async {
            debug!("inserting user document");
            let result = self
                .bounded("create", self.collection.insert_one(user_fields(user)))
                .await?;

            debug!("rendering inserted identifier");
            let id = render_inserted_id(result.inserted_id)?;
            debug!(user_id = %id, "user created");
            Ok(id)
        }
        .instrument(self.span.clone())
        .await
        .inspect_err(log_failure("create"))
    }

    async fn find_one(&self, id: &UserId) -> Result<User, UserPersistenceError> {
        async {
            let object_id = parse_object_id(id)?;

            debug!(user_id = %id, "finding user document");
            let document = self
                .bounded("find_one", self.collection.find_one(id_filter(object_id)))
                .await?
                .ok_or_else(|| UserPersistenceError::not_found(id.as_str()))?;

            decode_user(document)
        }
        .instrument(self.span.clone())
        .await
        .inspect_err(log_failure("find_one"))
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        async {
            let id = user
                .id()
                .ok_or_else(|| UserPersistenceError::invalid_identifier("<none>"))?;
            let object_id = parse_object_id(id)?;

            debug!(user_id = %id, "updating user document");
            let update = doc! { "$set": user_fields(user) };
            let result = self
                .bounded(
                    "update",
                    self.collection.update_one(id_filter(object_id), update),
                )
                .await?;

            require_match(result.matched_count, id)?;
            trace!(
                matched = result.matched_count,
                modified = result.modified_count,
                "user document updated"
            );
            Ok(())
        }
        .instrument(self.span.clone())
        .await
        .inspect_err(log_failure("update"))
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError> {
        async {
            let object_id = parse_object_id(id)?;

            debug!(user_id = %id, "deleting user document");
            let result = self
                .bounded("delete", self.collection.delete_one(id_filter(object_id)))
                .await?;

            require_match(result.deleted_count, id)?;
            trace!(deleted = result.deleted_count, "user document deleted");
            Ok(())
        }
        .instrument(self.span.clone())
        .await
        .inspect_err(log_failure("delete"))
    }
}
