//! Classification of MongoDB driver failures into user persistence errors.

use mongodb::error::{Error as MongoError, ErrorKind};
use tracing::debug;

use crate::domain::ports::UserPersistenceError;

/// Map a driver error into the closed port taxonomy.
///
/// Network, server-selection and authentication failures are connection
/// errors; BSON decoding failures are decoding errors; everything else is a
/// query error.
pub(super) fn map_mongo_error(error: MongoError) -> UserPersistenceError {
    debug!(error = %error, labels = ?error.labels(), "mongodb operation failed");

    match error.kind.as_ref() {
        ErrorKind::Io(_)
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::Authentication { .. } => UserPersistenceError::connection(error.to_string()),
        ErrorKind::BsonDeserialization(_) => UserPersistenceError::decoding(error.to_string()),
        _ => UserPersistenceError::query(error.to_string()),
    }
}
