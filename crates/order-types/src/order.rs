//! Order entity and its lifecycle state machine.
//!
//! An order starts as `Pending` and can move to one of two terminal states:
//! `Confirmed` through [`Order::confirm`] or `Cancelled` through
//! [`Order::cancel`]. Repeating the transition that produced the current
//! state is accepted as a no-op.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
	/// Order has been created but not confirmed.
	Pending,
	/// Order has been confirmed.
	Confirmed,
	/// Order has been cancelled.
	Cancelled,
}

impl OrderStatus {
	/// Returns true if `target` is reachable from this status in one step.
	///
	/// Self-transitions into a terminal state are allowed so that repeated
	/// confirm/cancel calls are idempotent.
	pub fn can_transition_to(&self, target: OrderStatus) -> bool {
		use OrderStatus::*;
		matches!(
			(*self, target),
			(Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Confirmed) | (Cancelled, Cancelled)
		)
	}

	/// Returns true for `Confirmed` and `Cancelled`.
	pub fn is_terminal(&self) -> bool {
		!matches!(self, OrderStatus::Pending)
	}

	/// Upper-case name, matching the serialized form.
	pub fn as_str(&self) -> &'static str {
		match self {
			OrderStatus::Pending => "PENDING",
			OrderStatus::Confirmed => "CONFIRMED",
			OrderStatus::Cancelled => "CANCELLED",
		}
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error raised when an order is asked to make a transition its current
/// status does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid state transition from {from} to {to}")]
pub struct TransitionError {
	pub from: OrderStatus,
	pub to: OrderStatus,
}

/// A purchase request tracked by the service.
///
/// `id`, `owner_id`, `amount` and `created_at` are fixed at creation time;
/// only `status` changes afterwards, and only through [`Order::confirm`]
/// and [`Order::cancel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	/// Unique identifier for this order.
	pub id: String,
	/// Identifier of the owner who placed the order.
	pub owner_id: String,
	/// Order amount. Never negative for orders created through the service.
	pub amount: f64,
	/// Current lifecycle status.
	pub status: OrderStatus,
	/// Creation timestamp.
	pub created_at: DateTime<Utc>,
}

impl Order {
	/// Builds a new `Pending` order with a fresh id.
	///
	/// Inputs are not validated here; callers are expected to have checked
	/// the owner id and amount already.
	pub fn create(owner_id: impl Into<String>, amount: f64) -> Self {
		Self {
			id: Uuid::new_v4().to_string(),
			owner_id: owner_id.into(),
			amount,
			status: OrderStatus::Pending,
			created_at: Utc::now(),
		}
	}

	/// Moves the order to `Confirmed`.
	///
	/// Fails if the order was cancelled. Confirming a confirmed order is a
	/// no-op.
	pub fn confirm(&mut self) -> Result<(), TransitionError> {
		self.transition(OrderStatus::Confirmed)
	}

	/// Moves the order to `Cancelled`.
	///
	/// Fails if the order was confirmed. Cancelling a cancelled order is a
	/// no-op.
	pub fn cancel(&mut self) -> Result<(), TransitionError> {
		self.transition(OrderStatus::Cancelled)
	}

	fn transition(&mut self, to: OrderStatus) -> Result<(), TransitionError> {
		if !self.status.can_transition_to(to) {
			return Err(TransitionError {
				from: self.status,
				to,
			});
		}
		self.status = to;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_create_yields_pending_order() {
		let order = Order::create("123", 100.0);

		assert!(!order.id.is_empty());
		assert_eq!(order.owner_id, "123");
		assert_eq!(order.amount, 100.0);
		assert_eq!(order.status, OrderStatus::Pending);
	}

	#[test]
	fn test_create_generates_distinct_ids() {
		let first = Order::create("123", 1.0);
		let second = Order::create("123", 1.0);
		assert_ne!(first.id, second.id);
	}

	#[test]
	fn test_confirm_pending_order() {
		let mut order = Order::create("123", 100.0);
		order.confirm().unwrap();
		assert_eq!(order.status, OrderStatus::Confirmed);
	}

	#[test]
	fn test_cancel_pending_order() {
		let mut order = Order::create("123", 100.0);
		order.cancel().unwrap();
		assert_eq!(order.status, OrderStatus::Cancelled);
	}

	#[test]
	fn test_confirm_is_idempotent() {
		let mut order = Order::create("123", 100.0);
		order.confirm().unwrap();
		order.confirm().unwrap();
		assert_eq!(order.status, OrderStatus::Confirmed);
	}

	#[test]
	fn test_cancel_is_idempotent() {
		let mut order = Order::create("123", 100.0);
		order.cancel().unwrap();
		order.cancel().unwrap();
		assert_eq!(order.status, OrderStatus::Cancelled);
	}

	#[test]
	fn test_confirm_cancelled_order_fails() {
		let mut order = Order::create("123", 100.0);
		order.cancel().unwrap();

		let err = order.confirm().unwrap_err();
		assert_eq!(
			err,
			TransitionError {
				from: OrderStatus::Cancelled,
				to: OrderStatus::Confirmed,
			}
		);
		assert_eq!(order.status, OrderStatus::Cancelled);
	}

	#[test]
	fn test_cancel_confirmed_order_fails() {
		let mut order = Order::create("123", 100.0);
		order.confirm().unwrap();

		assert!(order.cancel().is_err());
		assert_eq!(order.status, OrderStatus::Confirmed);
	}

	#[test]
	fn test_json_shape() {
		let order = Order::create("123", 100.0);
		let json = serde_json::to_value(&order).unwrap();

		assert_eq!(json["id"], order.id.as_str());
		assert_eq!(json["ownerId"], "123");
		assert_eq!(json["amount"], 100.0);
		assert_eq!(json["status"], "PENDING");
		assert!(json["createdAt"].is_string());
	}

	#[test]
	fn test_error_message_names_both_states() {
		let err = TransitionError {
			from: OrderStatus::Confirmed,
			to: OrderStatus::Cancelled,
		};
		assert_eq!(
			err.to_string(),
			"Invalid state transition from CONFIRMED to CANCELLED"
		);
	}

	fn any_status() -> impl Strategy<Value = OrderStatus> {
		prop_oneof![
			Just(OrderStatus::Pending),
			Just(OrderStatus::Confirmed),
			Just(OrderStatus::Cancelled),
		]
	}

	proptest! {
		#[test]
		fn nothing_returns_to_pending(from in any_status()) {
			prop_assert!(!from.can_transition_to(OrderStatus::Pending));
		}

		#[test]
		fn terminal_states_only_loop(from in any_status(), to in any_status()) {
			if from.is_terminal() && from != to {
				prop_assert!(!from.can_transition_to(to));
			}
		}

		#[test]
		fn failed_transition_leaves_status_untouched(
			start in any_status(),
			confirm in any::<bool>(),
		) {
			let mut order = Order::create("owner", 1.0);
			order.status = start;
			let result = if confirm { order.confirm() } else { order.cancel() };
			if result.is_err() {
				prop_assert_eq!(order.status, start);
			} else {
				let expected = if confirm { OrderStatus::Confirmed } else { OrderStatus::Cancelled };
				prop_assert_eq!(order.status, expected);
			}
		}
	}
}
