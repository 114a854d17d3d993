//! Shared state used by the order services.

pub mod locks;

pub use locks::OrderLocks;
