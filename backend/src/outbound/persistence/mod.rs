//! MongoDB persistence adapters.
//!
//! Concrete implementations of domain repository ports backed by a MongoDB
//! collection through the official async driver.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   BSON documents and domain types. No business logic resides here.
//! - **Internal documents**: the stored document shape (`documents.rs`) is an
//!   implementation detail, never exposed to the domain layer.
//! - **Shared handles**: the driver's `Database` handle pools connections
//!   internally and is cloned into each adapter.
//! - **Strongly typed errors**: all driver errors are mapped to domain
//!   persistence error types.
//!
//! # Example
//!
//! ```ignore
//! use user_service::outbound::persistence::{connect, ConnectionConfig, MongoUserRepository};
//!
//! let database = connect(&ConnectionConfig::new("localhost", 27017, "user_service")).await?;
//! let repo = MongoUserRepository::new(&database, "users");
//! ```

mod client;
mod documents;
mod error_mapping;
mod mongo_user_repository;

pub use client::{ConnectionConfig, ConnectionError, connect};
pub use mongo_user_repository::{DEFAULT_OPERATION_TIMEOUT, MongoUserRepository};
