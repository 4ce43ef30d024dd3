//! Domain primitives and ports.
//!
//! Purpose: define the user entity, the storage capability the rest of the
//! service depends on, and transport-agnostic errors. Nothing here knows
//! about MongoDB or HTTP.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User / UserId: the persisted entity and its opaque identifier.
//! - UserDraft: validated caller input awaiting credential hashing.
//! - ports::UserRepository: storage capability implemented by adapters.

pub mod error;
pub mod password;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_draft;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::password::{PasswordHashError, hash_password};
pub use self::trace_id::TraceId;
pub use self::user::{User, UserId};
pub use self::user_draft::{UserDraft, UserDraftValidationError};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
