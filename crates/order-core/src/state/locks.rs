//! Per-order mutual exclusion.
//!
//! A transition is a read-modify-write against the repository: load the
//! order, change its status, save it back. Two such sequences running
//! concurrently on the same id could both read the old status and the later
//! save would silently overwrite the earlier one. Holding the order's lock
//! across the whole sequence serializes them.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of async mutexes keyed by order id.
///
/// Entries are created on first use and removed when the last
/// [`OrderLockGuard`] for the id is dropped with no other task waiting, so
/// the map only holds ids with in-flight transitions. This also holds when
/// the acquiring future is dropped before it completes.
#[derive(Debug, Default)]
pub struct OrderLocks {
	locks: DashMap<String, Arc<Mutex<()>>>,
}

/// Exclusive access to one order id; released on drop.
#[derive(Debug)]
pub struct OrderLockGuard<'a> {
	guard: Option<OwnedMutexGuard<()>>,
	locks: &'a OrderLocks,
	order_id: String,
}

impl Drop for OrderLockGuard<'_> {
	fn drop(&mut self) {
		// The mutex guard holds a reference to the entry and must go first
		self.guard.take();
		self.locks.release(&self.order_id);
	}
}

impl OrderLocks {
	pub fn new() -> Self {
		Self::default()
	}

	/// Waits for exclusive access to `order_id`.
	pub async fn acquire(&self, order_id: &str) -> OrderLockGuard<'_> {
		// Clone the Arc out so the shard guard is released before awaiting
		let mutex = self
			.locks
			.entry(order_id.to_string())
			.or_insert_with(|| Arc::new(Mutex::new(())))
			.clone();

		let mut guard = OrderLockGuard {
			guard: None,
			locks: self,
			order_id: order_id.to_string(),
		};
		// `mutex` moves into the pending lock future, which is dropped before
		// `guard` if this future is cancelled while waiting
		guard.guard = Some(mutex.lock_owned().await);
		guard
	}

	/// Drops the entry for `order_id` when nobody else references it.
	fn release(&self, order_id: &str) {
		self.locks
			.remove_if(order_id, |_, mutex| Arc::strong_count(mutex) == 1);
	}

	/// Number of ids that currently have a lock entry.
	pub fn len(&self) -> usize {
		self.locks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.locks.is_empty()
	}
}
