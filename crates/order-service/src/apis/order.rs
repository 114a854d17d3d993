//! Order endpoints.
//!
//! Thin adapters from HTTP to the order use cases: each handler extracts its
//! input, calls one use case on the engine and maps the outcome to a status
//! code. Failures are reported with the shared `ErrorResponse` envelope.

use crate::server::AppState;
use axum::{
	extract::{rejection::JsonRejection, Path, Query, State},
	http::StatusCode,
	response::Json,
};
use order_core::OrderServiceError;
use order_types::{APIError, CreateOrderRequest, ListOrdersQuery, Order};
use thiserror::Error;

/// Errors that can occur while serving an order request.
#[derive(Debug, Error)]
pub enum OrderError {
	/// The request body could not be parsed.
	#[error("Invalid request: {0}")]
	InvalidRequest(String),
	#[error(transparent)]
	Service(#[from] OrderServiceError),
}

impl From<JsonRejection> for OrderError {
	fn from(rejection: JsonRejection) -> Self {
		OrderError::InvalidRequest(rejection.body_text())
	}
}

impl From<OrderError> for APIError {
	fn from(err: OrderError) -> Self {
		let message = err.to_string();
		match err {
			OrderError::InvalidRequest(_) => APIError::BadRequest {
				error_type: "INVALID_REQUEST".to_string(),
				message,
				details: None,
			},
			OrderError::Service(OrderServiceError::InvalidArgument(_)) => APIError::BadRequest {
				error_type: "INVALID_ARGUMENT".to_string(),
				message,
				details: None,
			},
			OrderError::Service(OrderServiceError::NotFound(_)) => APIError::NotFound {
				error_type: "ORDER_NOT_FOUND".to_string(),
				message,
			},
			OrderError::Service(OrderServiceError::InvalidState(_)) => APIError::Conflict {
				error_type: "INVALID_STATE".to_string(),
				message,
				details: None,
			},
			OrderError::Service(OrderServiceError::Storage(e)) => {
				tracing::error!(error = %e, "Order storage failure");
				APIError::InternalServerError {
					error_type: "INTERNAL_ERROR".to_string(),
					message: "Internal storage error".to_string(),
				}
			},
		}
	}
}

/// Handles POST /api/orders requests.
pub async fn create_order(
	State(state): State<AppState>,
	payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), APIError> {
	let Json(request) = payload.map_err(|e| {
		tracing::warn!("Rejected malformed order request: {}", e.body_text());
		APIError::from(OrderError::from(e))
	})?;

	let order = state
		.engine
		.create()
		.create_order(request.owner_id.as_deref(), request.amount)
		.await
		.map_err(into_api_error)?;

	Ok((StatusCode::CREATED, Json(order)))
}

/// Handles POST /api/orders/{id}/confirm requests.
pub async fn confirm_order(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<Order>, APIError> {
	let order = state
		.engine
		.confirm()
		.confirm_order(&id)
		.await
		.map_err(into_api_error)?;
	Ok(Json(order))
}

/// Handles POST /api/orders/{id}/cancel requests.
pub async fn cancel_order(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<Order>, APIError> {
	let order = state
		.engine
		.cancel()
		.cancel_order(&id)
		.await
		.map_err(into_api_error)?;
	Ok(Json(order))
}

/// Handles GET /api/orders/{id} requests.
pub async fn get_order_by_id(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<Order>, APIError> {
	let order = state
		.engine
		.queries()
		.get_order(&id)
		.await
		.map_err(into_api_error)?;
	Ok(Json(order))
}

/// Handles GET /api/orders requests, optionally filtered by `ownerId`.
pub async fn list_orders(
	Query(query): Query<ListOrdersQuery>,
	State(state): State<AppState>,
) -> Result<Json<Vec<Order>>, APIError> {
	let orders = state
		.engine
		.queries()
		.list_orders(query.owner_id.as_deref())
		.await
		.map_err(into_api_error)?;
	Ok(Json(orders))
}

fn into_api_error(err: OrderServiceError) -> APIError {
	APIError::from(OrderError::from(err))
}
