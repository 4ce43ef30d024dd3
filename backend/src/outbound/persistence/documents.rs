//! BSON document shape of stored users and identifier translation.
//!
//! Stored documents look like
//! `{ "_id": ObjectId, "name": String, "password": String, "email": String }`.
//! The `_id` key is owned by MongoDB: it is never part of an insert body or
//! an update field set.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Bson, Document, doc};
use serde::Deserialize;

use crate::domain::ports::UserPersistenceError;
use crate::domain::{User, UserId};

pub(super) const ID_FIELD: &str = "_id";
pub(super) const NAME_FIELD: &str = "name";
pub(super) const PASSWORD_FIELD: &str = "password";
pub(super) const EMAIL_FIELD: &str = "email";

/// Read model for a stored user document.
#[derive(Debug, Deserialize)]
pub(super) struct UserDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    #[serde(rename = "password")]
    password_hash: String,
    email: String,
}

impl From<UserDocument> for User {
    fn from(document: UserDocument) -> Self {
        User::new(document.name, document.password_hash, document.email)
            .with_id(render_object_id(document.id))
    }
}

/// Every mutable user field keyed by its stored name, without `_id`.
///
/// Used verbatim as the insert body and as the `$set` payload of updates.
pub(super) fn user_fields(user: &User) -> Document {
    doc! {
        NAME_FIELD: user.name(),
        PASSWORD_FIELD: user.password_hash(),
        EMAIL_FIELD: user.email(),
    }
}

/// Filter matching exactly the document stored under `id`.
pub(super) fn id_filter(id: ObjectId) -> Document {
    doc! { ID_FIELD: id }
}

/// Parse an opaque identifier into the store's native key.
pub(super) fn parse_object_id(id: &UserId) -> Result<ObjectId, UserPersistenceError> {
    ObjectId::parse_str(id.as_str())
        .map_err(|_| UserPersistenceError::invalid_identifier(id.as_str()))
}

/// Render a native key as an opaque identifier.
pub(super) fn render_object_id(id: ObjectId) -> UserId {
    UserId::new(id.to_hex())
}

/// Render the key MongoDB reports for an inserted document.
pub(super) fn render_inserted_id(inserted: Bson) -> Result<UserId, UserPersistenceError> {
    match inserted {
        Bson::ObjectId(id) => Ok(render_object_id(id)),
        other => Err(UserPersistenceError::encoding(format!(
            "expected ObjectId for inserted user, got {:?}",
            other.element_type()
        ))),
    }
}

/// Treat a write that touched no document as `NotFound` for `id`.
///
/// `affected` is `matched_count` for updates and `deleted_count` for deletes.
pub(super) fn require_match(affected: u64, id: &UserId) -> Result<(), UserPersistenceError> {
    if affected == 0 {
        Err(UserPersistenceError::not_found(id.as_str()))
    } else {
        Ok(())
    }
}

/// Decode a raw stored document into a [`User`].
pub(super) fn decode_user(document: Document) -> Result<User, UserPersistenceError> {
    bson::from_document::<UserDocument>(document)
        .map(User::from)
        .map_err(|err| UserPersistenceError::decoding(err.to_string()))
}
