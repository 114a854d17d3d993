//! Common types for the order service.
//!
//! Defines the domain entity and the data structures shared by the storage,
//! core and service crates so that every layer speaks the same types.

/// API types for HTTP endpoints and request/response structures.
pub mod api;
/// The order entity and its lifecycle state machine.
pub mod order;
/// Registry trait for configuration-selected implementations.
pub mod registry;
/// Storage namespaces.
pub mod storage;
/// Configuration validation types.
pub mod validation;

pub use api::*;
pub use order::*;
pub use registry::*;
pub use storage::*;
pub use validation::*;
