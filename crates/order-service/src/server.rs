//! HTTP server for the order service API.

use crate::apis::order;
use axum::{
	extract::{DefaultBodyLimit, State},
	response::Json,
	routing::{get, post},
	Router,
};
use order_config::ApiConfig;
use order_core::OrderEngine;
use order_types::HealthResponse;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Engine exposing the order use cases.
	pub engine: Arc<OrderEngine>,
}

/// Builds the router with the `/api` order routes and `/health`.
pub fn build_router(state: AppState, max_request_size: usize) -> Router {
	Router::new()
		.route("/health", get(handle_health))
		.nest(
			"/api",
			Router::new()
				.route("/orders", post(order::create_order).get(order::list_orders))
				.route("/orders/{id}", get(order::get_order_by_id))
				.route("/orders/{id}/confirm", post(order::confirm_order))
				.route("/orders/{id}/cancel", post(order::cancel_order)),
		)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(CorsLayer::permissive())
				.layer(DefaultBodyLimit::max(max_request_size)),
		)
		.with_state(state)
}

/// Starts the HTTP server for the API.
pub async fn start_server(
	api_config: ApiConfig,
	engine: Arc<OrderEngine>,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = build_router(AppState { engine }, api_config.max_request_size);

	let bind_address = format!("{}:{}", api_config.host, api_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Order service API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

/// Handles GET /health requests.
async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "ok".to_string(),
		service: state.engine.config().service.id.clone(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::{body::Body, http::Request, http::StatusCode};
	use order_config::builders::config::ConfigBuilder;
	use tower::ServiceExt;

	fn make_router(max_request_size: usize) -> Router {
		let config = ConfigBuilder::new()
			.service_id("health-test")
			.api(Some(ApiConfig {
				enabled: true,
				host: "127.0.0.1".to_string(),
				port: 3000,
				max_request_size,
			}))
			.build();
		let api_config = config.enabled_api().cloned().unwrap();
		let engine = crate::factory_registry::build_engine_from_config(config).unwrap();
		build_router(
			AppState {
				engine: Arc::new(engine),
			},
			api_config.max_request_size,
		)
	}

	#[tokio::test]
	async fn test_health() {
		let resp = make_router(1024)
			.oneshot(Request::get("/health").body(Body::empty()).unwrap())
			.await
			.unwrap();
		assert_eq!(resp.status(), StatusCode::OK);

		let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
			.await
			.unwrap();
		let body: HealthResponse = serde_json::from_slice(&bytes).unwrap();
		assert_eq!(body.status, "ok");
		assert_eq!(body.service, "health-test");
	}

	#[tokio::test]
	async fn test_oversized_body_is_rejected() {
		let payload = format!(r#"{{"ownerId": "{}", "amount": 1.0}}"#, "x".repeat(256));
		let resp = make_router(64)
			.oneshot(
				Request::post("/api/orders")
					.header("content-type", "application/json")
					.body(Body::from(payload))
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[tokio::test]
	async fn test_body_within_limit_is_accepted() {
		let resp = make_router(64)
			.oneshot(
				Request::post("/api/orders")
					.header("content-type", "application/json")
					.body(Body::from(r#"{"ownerId": "1", "amount": 1.0}"#))
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(resp.status(), StatusCode::CREATED);
	}

	#[tokio::test]
	async fn test_unknown_route_is_not_found() {
		let resp = make_router(1024)
			.oneshot(Request::get("/api/unknown").body(Body::empty()).unwrap())
			.await
			.unwrap();
		assert_eq!(resp.status(), StatusCode::NOT_FOUND);
	}
}
