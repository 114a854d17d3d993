use super::OrderQueryUseCase;
use crate::OrderServiceError;
use async_trait::async_trait;
use order_storage::OrderRepository;
use order_types::Order;
use std::sync::Arc;

/// Read side of the order service.
pub struct OrderQueryService {
	repository: Arc<dyn OrderRepository>,
}

impl OrderQueryService {
	pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
		Self { repository }
	}
}

#[async_trait]
impl OrderQueryUseCase for OrderQueryService {
	async fn get_order(&self, order_id: &str) -> Result<Order, OrderServiceError> {
		tracing::debug!(order_id = %order_id, "Looking up order");
		self.repository
			.find_by_id(order_id)
			.await?
			.ok_or_else(|| OrderServiceError::NotFound(order_id.to_string()))
	}

	async fn list_orders(&self, owner_id: Option<&str>) -> Result<Vec<Order>, OrderServiceError> {
		let mut orders = match owner_id {
			Some(owner_id) => self.repository.find_by_owner(owner_id).await?,
			None => self.repository.find_all().await?,
		};
		// The repository makes no ordering promise
		orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
		Ok(orders)
	}
}
