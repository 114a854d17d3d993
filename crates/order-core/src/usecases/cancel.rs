use super::{apply_transition, CancelOrderUseCase};
use crate::{state::OrderLocks, OrderServiceError};
use async_trait::async_trait;
use order_storage::OrderRepository;
use order_types::Order;
use std::sync::Arc;

/// Cancels a stored order. Cancelled orders stay cancelled; confirmed
/// orders cannot be cancelled.
pub struct CancelOrderService {
	repository: Arc<dyn OrderRepository>,
	locks: Arc<OrderLocks>,
}

impl CancelOrderService {
	pub fn new(repository: Arc<dyn OrderRepository>, locks: Arc<OrderLocks>) -> Self {
		Self { repository, locks }
	}
}

#[async_trait]
impl CancelOrderUseCase for CancelOrderService {
	async fn cancel_order(&self, order_id: &str) -> Result<Order, OrderServiceError> {
		let order = apply_transition(self.repository.as_ref(), &self.locks, order_id, Order::cancel)
			.await
			.inspect_err(|e| {
				tracing::warn!(order_id = %order_id, error = %e, "Order cancellation failed");
			})?;

		tracing::info!(order_id = %order.id, "Cancelled order");
		Ok(order)
	}
}
