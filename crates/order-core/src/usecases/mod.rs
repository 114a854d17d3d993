//! Inbound ports and their application services.
//!
//! Each trait here is one operation the outside world (the HTTP adapter,
//! tests) can invoke. The services implementing them orchestrate the
//! [`Order`] entity against an [`OrderRepository`].

use crate::{state::OrderLocks, OrderServiceError};
use async_trait::async_trait;
use order_storage::OrderRepository;
use order_types::{Order, TransitionError};

mod cancel;
mod confirm;
mod create;
mod query;

pub use cancel::CancelOrderService;
pub use confirm::ConfirmOrderService;
pub use create::CreateOrderService;
pub use query::OrderQueryService;

/// Creates new orders.
#[async_trait]
pub trait CreateOrderUseCase: Send + Sync {
	/// Creates and stores a `Pending` order.
	///
	/// `owner_id` is optional so that a missing owner at the boundary is
	/// reported as `InvalidArgument` like an empty one.
	async fn create_order(
		&self,
		owner_id: Option<&str>,
		amount: f64,
	) -> Result<Order, OrderServiceError>;
}

/// Confirms existing orders.
#[async_trait]
pub trait ConfirmOrderUseCase: Send + Sync {
	async fn confirm_order(&self, order_id: &str) -> Result<Order, OrderServiceError>;
}

/// Cancels existing orders.
#[async_trait]
pub trait CancelOrderUseCase: Send + Sync {
	async fn cancel_order(&self, order_id: &str) -> Result<Order, OrderServiceError>;
}

/// Read-only access to orders.
#[async_trait]
pub trait OrderQueryUseCase: Send + Sync {
	/// Fetches one order, failing with `NotFound` when it does not exist.
	async fn get_order(&self, order_id: &str) -> Result<Order, OrderServiceError>;

	/// Lists all orders, or only those of `owner_id` when given, oldest first.
	async fn list_orders(&self, owner_id: Option<&str>) -> Result<Vec<Order>, OrderServiceError>;
}

/// Runs `transition` on the stored order under its lock and saves the
/// result.
///
/// Nothing is written when the order is missing or the transition is
/// rejected.
pub(crate) async fn apply_transition<F>(
	repository: &dyn OrderRepository,
	locks: &OrderLocks,
	order_id: &str,
	transition: F,
) -> Result<Order, OrderServiceError>
where
	F: FnOnce(&mut Order) -> Result<(), TransitionError> + Send,
{
	let _guard = locks.acquire(order_id).await;

	let mut order = repository
		.find_by_id(order_id)
		.await?
		.ok_or_else(|| OrderServiceError::NotFound(order_id.to_string()))?;

	transition(&mut order)?;

	Ok(repository.save(order).await?)
}
