//! Registry of storage implementations available to the service.
//!
//! Backends register themselves through `order_storage::get_all_implementations`;
//! the registry resolves the names used in configuration to factories.

use order_config::Config;
use order_core::{OrderEngine, OrderEngineBuilder};
use order_storage::StorageFactory;
use std::collections::HashMap;

/// Registry of implementation factories, keyed by configuration name.
pub struct FactoryRegistry {
	pub storage: HashMap<String, StorageFactory>,
}

impl FactoryRegistry {
	/// Create a new empty registry
	pub fn new() -> Self {
		Self {
			storage: HashMap::new(),
		}
	}

	/// Register a storage implementation
	pub fn register_storage(&mut self, name: impl Into<String>, factory: StorageFactory) {
		self.storage.insert(name.into(), factory);
	}
}

/// Builds a registry holding every implementation the service ships with.
pub fn default_registry() -> FactoryRegistry {
	let mut registry = FactoryRegistry::new();

	for (name, factory) in order_storage::get_all_implementations() {
		tracing::debug!("Registering storage implementation: {}", name);
		registry.register_storage(name, factory);
	}

	registry
}

/// Resolves every configured storage implementation to its factory.
///
/// Fails on the first name with no registered implementation.
fn storage_factories(
	registry: &FactoryRegistry,
	config: &Config,
) -> Result<HashMap<String, StorageFactory>, String> {
	let mut factories = HashMap::new();
	for name in config.storage.implementations.keys() {
		match registry.storage.get(name) {
			Some(factory) => {
				factories.insert(name.clone(), *factory);
			},
			None => {
				let mut available: Vec<_> = registry.storage.keys().cloned().collect();
				available.sort();
				return Err(format!(
					"Unknown storage implementation '{}'. Available: [{}]",
					name,
					available.join(", ")
				));
			},
		}
	}
	Ok(factories)
}

/// Build the order engine using the registry and config.
pub fn build_engine_from_config(config: Config) -> Result<OrderEngine, Box<dyn std::error::Error>> {
	let factories = storage_factories(&default_registry(), &config)?;
	Ok(OrderEngineBuilder::new(config).build(factories)?)
}
