//! Application core of the order service.
//!
//! Holds the inbound use cases (create, confirm, cancel, query), the
//! service error type they share, and the builder that wires them to a
//! storage backend selected by configuration.

use order_storage::StorageError;
use order_types::TransitionError;
use thiserror::Error;

pub mod builder;
pub mod state;
pub mod usecases;

pub use builder::{BuilderError, OrderEngine, OrderEngineBuilder};
pub use usecases::{
	CancelOrderService, CancelOrderUseCase, ConfirmOrderService, ConfirmOrderUseCase,
	CreateOrderService, CreateOrderUseCase, OrderQueryService, OrderQueryUseCase,
};

/// Errors returned by the order use cases.
#[derive(Debug, Error)]
pub enum OrderServiceError {
	/// Input failed validation; nothing was stored.
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	/// No order exists with the given id.
	#[error("Order not found with id: {0}")]
	NotFound(String),
	/// The requested status change is not allowed from the current status.
	#[error(transparent)]
	InvalidState(#[from] TransitionError),
	/// The repository failed.
	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),
}
