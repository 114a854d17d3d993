//! In-memory storage backend.
//!
//! Keeps every value in a `HashMap` guarded by an async read-write lock.
//! Nothing survives a restart; this is the default backend for the service.

use crate::{StorageError, StorageFactory, StorageInterface, StorageRegistry};
use async_trait::async_trait;
use order_types::{ConfigSchema, Field, FieldType, ImplementationRegistry, Schema, ValidationError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory storage implementation.
pub struct MemoryStorage {
	/// The in-memory store protected by a read-write lock.
	store: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
	/// Creates a new, empty MemoryStorage instance.
	pub fn new() -> Self {
		Self::with_capacity(0)
	}

	/// Creates a MemoryStorage with room for `capacity` entries.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			store: Arc::new(RwLock::new(HashMap::with_capacity(capacity))),
		}
	}
}

impl Default for MemoryStorage {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl StorageInterface for MemoryStorage {
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		let store = self.store.read().await;
		store.get(key).cloned().ok_or(StorageError::NotFound)
	}

	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
		let mut store = self.store.write().await;
		store.insert(key.to_string(), value);
		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<(), StorageError> {
		let mut store = self.store.write().await;
		store.remove(key);
		Ok(())
	}

	async fn exists(&self, key: &str) -> Result<bool, StorageError> {
		let store = self.store.read().await;
		Ok(store.contains_key(key))
	}

	async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
		let store = self.store.read().await;
		Ok(store
			.keys()
			.filter(|key| key.starts_with(prefix))
			.cloned()
			.collect())
	}

	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(MemoryStorageSchema)
	}
}

/// Configuration schema for MemoryStorage.
///
/// Accepts an optional `initial_capacity` (non-negative integer).
pub struct MemoryStorageSchema;

impl ConfigSchema for MemoryStorageSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![],
			vec![Field::new(
				"initial_capacity",
				FieldType::Integer {
					min: Some(0),
					max: None,
				},
			)],
		);
		schema.validate(config)
	}
}

/// Factory function to create a memory storage backend from configuration.
///
/// Configuration parameters:
/// - `initial_capacity`: number of entries to pre-allocate (default: 0)
pub fn create_storage(config: &toml::Value) -> Result<Box<dyn StorageInterface>, StorageError> {
	MemoryStorageSchema
		.validate(config)
		.map_err(|e| StorageError::Configuration(e.to_string()))?;

	let capacity = config
		.get("initial_capacity")
		.and_then(|v| v.as_integer())
		.unwrap_or(0) as usize;

	Ok(Box::new(MemoryStorage::with_capacity(capacity)))
}

/// Registry for the memory storage implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "memory";
	type Factory = StorageFactory;

	fn factory() -> Self::Factory {
		create_storage
	}
}

impl StorageRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_basic_operations() {
		let storage = MemoryStorage::new();

		let key = "test_key";
		let value = b"test_value".to_vec();
		storage.set_bytes(key, value.clone()).await.unwrap();

		assert_eq!(storage.get_bytes(key).await.unwrap(), value);
		assert!(storage.exists(key).await.unwrap());

		storage.delete(key).await.unwrap();
		assert!(!storage.exists(key).await.unwrap());

		let result = storage.get_bytes(key).await;
		assert!(matches!(result, Err(StorageError::NotFound)));
	}

	#[tokio::test]
	async fn test_overwrite() {
		let storage = MemoryStorage::new();

		storage.set_bytes("k", b"value1".to_vec()).await.unwrap();
		storage.set_bytes("k", b"value2".to_vec()).await.unwrap();

		assert_eq!(storage.get_bytes("k").await.unwrap(), b"value2".to_vec());
		assert_eq!(storage.keys_with_prefix("").await.unwrap().len(), 1);
	}

	#[tokio::test]
	async fn test_keys_with_prefix() {
		let storage = MemoryStorage::new();
		storage.set_bytes("orders:1", vec![1]).await.unwrap();
		storage.set_bytes("orders:2", vec![2]).await.unwrap();
		storage.set_bytes("other:1", vec![3]).await.unwrap();

		let mut keys = storage.keys_with_prefix("orders:").await.unwrap();
		keys.sort();
		assert_eq!(keys, vec!["orders:1".to_string(), "orders:2".to_string()]);
	}

	#[test]
	fn test_factory_validates_config() {
		let mut table = toml::map::Map::new();
		table.insert("initial_capacity".into(), toml::Value::Integer(16));
		assert!(create_storage(&toml::Value::Table(table)).is_ok());

		let mut table = toml::map::Map::new();
		table.insert("initial_capacity".into(), toml::Value::Integer(-1));
		let result = create_storage(&toml::Value::Table(table));
		assert!(matches!(result, Err(StorageError::Configuration(_))));
	}
}
