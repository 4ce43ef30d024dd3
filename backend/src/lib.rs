//! User service library: a REST CRUD surface over users stored in MongoDB.
//!
//! Layout follows a ports-and-adapters split:
//!
//! - [`domain`]: the user entity, the repository port and transport-agnostic
//!   errors.
//! - [`outbound`]: MongoDB and in-memory implementations of the port.
//! - [`inbound`]: Actix HTTP handlers calling the port.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
