//! Order repository port and its storage-backed adapter.

use crate::{StorageError, StorageService};
use async_trait::async_trait;
use order_types::{Order, StorageKey};
use std::sync::Arc;

/// Outbound port through which the use cases persist and look up orders.
///
/// `save` is an upsert keyed by the order id. Absence is reported as `None`
/// or an empty list, never as an error; errors are reserved for backend
/// failures.
#[async_trait]
pub trait OrderRepository: Send + Sync {
	/// Inserts or replaces the order under its id and returns the stored value.
	async fn save(&self, order: Order) -> Result<Order, StorageError>;

	/// Looks an order up by id.
	async fn find_by_id(&self, id: &str) -> Result<Option<Order>, StorageError>;

	/// Returns every stored order in no particular order.
	async fn find_all(&self) -> Result<Vec<Order>, StorageError>;

	/// Returns the orders whose owner id matches exactly.
	async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Order>, StorageError>;
}

/// [`OrderRepository`] implementation over a [`StorageService`].
///
/// Orders are stored as JSON under the `orders` namespace, so any
/// [`crate::StorageInterface`] backend can hold them.
pub struct OrderStore {
	storage: Arc<StorageService>,
}

impl OrderStore {
	pub fn new(storage: Arc<StorageService>) -> Self {
		Self { storage }
	}
}

#[async_trait]
impl OrderRepository for OrderStore {
	async fn save(&self, order: Order) -> Result<Order, StorageError> {
		self.storage
			.store(StorageKey::Orders.as_str(), &order.id, &order)
			.await?;
		tracing::debug!(order_id = %order.id, status = %order.status, "Saved order");
		Ok(order)
	}

	async fn find_by_id(&self, id: &str) -> Result<Option<Order>, StorageError> {
		match self
			.storage
			.retrieve::<Order>(StorageKey::Orders.as_str(), id)
			.await
		{
			Ok(order) => Ok(Some(order)),
			Err(StorageError::NotFound) => Ok(None),
			Err(e) => Err(e),
		}
	}

	async fn find_all(&self) -> Result<Vec<Order>, StorageError> {
		self.storage.retrieve_all(StorageKey::Orders.as_str()).await
	}

	async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Order>, StorageError> {
		let orders = self.find_all().await?;
		Ok(orders
			.into_iter()
			.filter(|order| order.owner_id == owner_id)
			.collect())
	}
}
