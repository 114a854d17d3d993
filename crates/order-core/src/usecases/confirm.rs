use super::{apply_transition, ConfirmOrderUseCase};
use crate::{state::OrderLocks, OrderServiceError};
use async_trait::async_trait;
use order_storage::OrderRepository;
use order_types::Order;
use std::sync::Arc;

/// Confirms a stored order.
///
/// Confirming an order that is already confirmed succeeds and leaves it
/// unchanged; confirming a cancelled order fails with `InvalidState`.
pub struct ConfirmOrderService {
	repository: Arc<dyn OrderRepository>,
	locks: Arc<OrderLocks>,
}

impl ConfirmOrderService {
	pub fn new(repository: Arc<dyn OrderRepository>, locks: Arc<OrderLocks>) -> Self {
		Self { repository, locks }
	}
}

#[async_trait]
impl ConfirmOrderUseCase for ConfirmOrderService {
	async fn confirm_order(&self, order_id: &str) -> Result<Order, OrderServiceError> {
		match apply_transition(self.repository.as_ref(), &self.locks, order_id, Order::confirm).await
		{
			Ok(order) => {
				tracing::info!(order_id = %order.id, "Confirmed order");
				Ok(order)
			},
			Err(e) => {
				tracing::warn!(order_id = %order_id, error = %e, "Order confirmation failed");
				Err(e)
			},
		}
	}
}
