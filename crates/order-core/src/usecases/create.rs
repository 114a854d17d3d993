use super::CreateOrderUseCase;
use crate::OrderServiceError;
use async_trait::async_trait;
use order_storage::OrderRepository;
use order_types::Order;
use std::sync::Arc;

/// Validates creation input and stores the new order.
pub struct CreateOrderService {
	repository: Arc<dyn OrderRepository>,
}

impl CreateOrderService {
	pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
		Self { repository }
	}
}

fn validate(owner_id: Option<&str>, amount: f64) -> Result<&str, OrderServiceError> {
	let owner_id = match owner_id {
		Some(id) if !id.trim().is_empty() => id,
		_ => {
			return Err(OrderServiceError::InvalidArgument(
				"ownerId must not be empty".into(),
			))
		},
	};

	// NaN fails every comparison, so `>= 0.0` rejects it too
	if !(amount >= 0.0) || !amount.is_finite() {
		return Err(OrderServiceError::InvalidArgument(format!(
			"amount must be a non-negative number, got {}",
			amount
		)));
	}

	Ok(owner_id)
}

#[async_trait]
impl CreateOrderUseCase for CreateOrderService {
	async fn create_order(
		&self,
		owner_id: Option<&str>,
		amount: f64,
	) -> Result<Order, OrderServiceError> {
		let owner_id = validate(owner_id, amount).inspect_err(|e| {
			tracing::warn!(error = %e, "Rejected order creation");
		})?;

		let order = self.repository.save(Order::create(owner_id, amount)).await?;
		tracing::info!(
			order_id = %order.id,
			owner_id = %order.owner_id,
			amount = order.amount,
			"Created order"
		);
		Ok(order)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::usecases::mocks::MockRepository;
	use order_storage::StorageError;
	use order_types::OrderStatus;
	use proptest::prelude::*;
	use std::collections::HashSet;

	fn service_with(repository: MockRepository) -> CreateOrderService {
		CreateOrderService::new(Arc::new(repository))
	}

	fn saving_repository() -> MockRepository {
		let mut repository = MockRepository::new();
		repository.expect_save().returning(Ok);
		repository
	}

	#[tokio::test]
	async fn test_create_order_is_saved() {
		let mut repository = MockRepository::new();
		repository
			.expect_save()
			.withf(|order| order.owner_id == "123" && order.status == OrderStatus::Pending)
			.times(1)
			.returning(Ok);

		let order = service_with(repository)
			.create_order(Some("123"), 100.0)
			.await
			.unwrap();

		assert_eq!(order.owner_id, "123");
		assert_eq!(order.amount, 100.0);
		assert_eq!(order.status, OrderStatus::Pending);
	}

	#[tokio::test]
	async fn test_zero_amount_is_allowed() {
		let order = service_with(saving_repository())
			.create_order(Some("123"), 0.0)
			.await
			.unwrap();
		assert_eq!(order.amount, 0.0);
	}

	#[tokio::test]
	async fn test_invalid_input_never_saves() {
		let cases: [(Option<&str>, f64); 6] = [
			(Some("123"), -100.0),
			(Some(""), 100.0),
			(Some("   "), 100.0),
			(None, 100.0),
			(Some("123"), f64::NAN),
			(Some("123"), f64::INFINITY),
		];

		for (owner_id, amount) in cases {
			let mut repository = MockRepository::new();
			repository.expect_save().never();

			let result = service_with(repository)
				.create_order(owner_id, amount)
				.await;
			assert!(
				matches!(result, Err(OrderServiceError::InvalidArgument(_))),
				"expected InvalidArgument for ({:?}, {})",
				owner_id,
				amount
			);
		}
	}

	#[tokio::test]
	async fn test_storage_failure_is_propagated() {
		let mut repository = MockRepository::new();
		repository
			.expect_save()
			.returning(|_| Err(StorageError::Backend("disk full".into())));

		let result = service_with(repository)
			.create_order(Some("123"), 1.0)
			.await;
		assert!(matches!(result, Err(OrderServiceError::Storage(_))));
	}

	proptest! {
		#[test]
		fn valid_input_yields_pending_orders_with_unique_ids(
			inputs in prop::collection::vec(("[a-z0-9]{1,12}", 0.0f64..1_000_000.0), 1..20)
		) {
			let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
			let service = service_with(saving_repository());
			let mut seen = HashSet::new();

			for (owner_id, amount) in inputs {
				let order = runtime
					.block_on(service.create_order(Some(&owner_id), amount))
					.unwrap();
				prop_assert_eq!(order.status, OrderStatus::Pending);
				prop_assert_eq!(&order.owner_id, &owner_id);
				prop_assert!(seen.insert(order.id));
			}
		}
	}
}
