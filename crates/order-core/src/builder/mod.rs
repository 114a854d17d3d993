//! Builder for wiring the order use cases to a configured storage backend.
//!
//! Storage implementations are supplied as factory functions keyed by the
//! name used under `[storage.implementations]`; the builder instantiates
//! the configured ones and hands the primary to the order repository.

use crate::{
	state::OrderLocks,
	usecases::{
		CancelOrderService, CancelOrderUseCase, ConfirmOrderService, ConfirmOrderUseCase,
		CreateOrderService, CreateOrderUseCase, OrderQueryService, OrderQueryUseCase,
	},
};
use order_config::Config;
use order_storage::{OrderRepository, OrderStore, StorageError, StorageInterface, StorageService};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while building an [`OrderEngine`].
#[derive(Debug, Error)]
pub enum BuilderError {
	#[error("Configuration error: {0}")]
	Config(String),
	#[error("Missing required component: {0}")]
	MissingComponent(String),
}

/// The assembled service: one handle per inbound use case.
///
/// Confirm and cancel share a single [`OrderLocks`] so that status changes
/// on the same order never interleave.
pub struct OrderEngine {
	config: Config,
	create: Arc<dyn CreateOrderUseCase>,
	confirm: Arc<dyn ConfirmOrderUseCase>,
	cancel: Arc<dyn CancelOrderUseCase>,
	queries: Arc<dyn OrderQueryUseCase>,
}

impl OrderEngine {
	/// Wires the default services over `repository`.
	pub fn new(config: Config, repository: Arc<dyn OrderRepository>) -> Self {
		let locks = Arc::new(OrderLocks::new());
		Self {
			config,
			create: Arc::new(CreateOrderService::new(Arc::clone(&repository))),
			confirm: Arc::new(ConfirmOrderService::new(
				Arc::clone(&repository),
				Arc::clone(&locks),
			)),
			cancel: Arc::new(CancelOrderService::new(Arc::clone(&repository), locks)),
			queries: Arc::new(OrderQueryService::new(repository)),
		}
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn create(&self) -> &dyn CreateOrderUseCase {
		self.create.as_ref()
	}

	pub fn confirm(&self) -> &dyn ConfirmOrderUseCase {
		self.confirm.as_ref()
	}

	pub fn cancel(&self) -> &dyn CancelOrderUseCase {
		self.cancel.as_ref()
	}

	pub fn queries(&self) -> &dyn OrderQueryUseCase {
		self.queries.as_ref()
	}
}

/// Builds an [`OrderEngine`] from configuration and storage factories.
pub struct OrderEngineBuilder {
	config: Config,
}

impl OrderEngineBuilder {
	pub fn new(config: Config) -> Self {
		Self { config }
	}

	/// Instantiates every configured storage implementation that has a
	/// factory, then builds the engine over the primary one.
	pub fn build<SF>(self, storage_factories: HashMap<String, SF>) -> Result<OrderEngine, BuilderError>
	where
		SF: Fn(&toml::Value) -> Result<Box<dyn StorageInterface>, StorageError>,
	{
		let mut storage_impls = HashMap::new();
		for (name, config) in &self.config.storage.implementations {
			let Some(factory) = storage_factories.get(name) else {
				tracing::warn!(
					component = "storage",
					implementation = %name,
					"No factory registered, skipping"
				);
				continue;
			};

			match factory(config) {
				Ok(implementation) => {
					storage_impls.insert(name.clone(), implementation);
					let is_primary = &self.config.storage.primary == name;
					tracing::info!(component = "storage", implementation = %name, enabled = %is_primary, "Loaded");
				},
				Err(e) => {
					tracing::error!(
						component = "storage",
						implementation = %name,
						error = %e,
						"Failed to create storage implementation"
					);
					return Err(BuilderError::Config(format!(
						"Failed to create storage implementation '{}': {}",
						name, e
					)));
				},
			}
		}

		if storage_impls.is_empty() {
			return Err(BuilderError::MissingComponent(
				"No valid storage implementations available".into(),
			));
		}

		let primary_storage = &self.config.storage.primary;
		let storage_backend = storage_impls.remove(primary_storage).ok_or_else(|| {
			BuilderError::Config(format!(
				"Primary storage '{}' failed to load or has invalid configuration",
				primary_storage
			))
		})?;

		let storage = Arc::new(StorageService::new(storage_backend));
		let repository: Arc<dyn OrderRepository> = Arc::new(OrderStore::new(storage));

		Ok(OrderEngine::new(self.config, repository))
	}
}
