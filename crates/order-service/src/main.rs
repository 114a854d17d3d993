//! Main entry point for the order service.
//!
//! Loads configuration, wires the order use cases to the configured storage
//! backend and serves them over HTTP.

use clap::Parser;
use order_config::Config;
use std::path::PathBuf;
use std::sync::Arc;

mod apis;
mod factory_registry;
mod server;

/// Command-line arguments for the order service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config/order-service.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the order service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Builds the order engine
/// 5. Serves the API until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	tracing::info!("Started order service");

	let config = Config::from_file(&args.config).await?;
	tracing::info!("Loaded configuration [{}]", config.service.id);

	let engine = Arc::new(factory_registry::build_engine_from_config(config.clone())?);

	match config.enabled_api() {
		Some(api_config) => {
			let api_task = server::start_server(api_config.clone(), Arc::clone(&engine));

			tokio::select! {
				result = api_task => {
					tracing::info!("API server finished");
					result?;
				},
				_ = tokio::signal::ctrl_c() => {
					tracing::info!("Received shutdown signal");
				},
			}
		},
		None => {
			tracing::warn!("API disabled, nothing to serve; waiting for shutdown signal");
			tokio::signal::ctrl_c().await?;
		},
	}

	tracing::info!("Stopped order service");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;

	#[test]
	fn test_args_default_values() {
		let args = Args::parse_from(["order-service"]);

		assert_eq!(args.config, PathBuf::from("config/order-service.toml"));
		assert_eq!(args.log_level, "info");
	}

	#[test]
	fn test_args_custom_values() {
		let args = Args::parse_from([
			"order-service",
			"--config",
			"custom.toml",
			"--log-level",
			"debug",
		]);

		assert_eq!(args.config, PathBuf::from("custom.toml"));
		assert_eq!(args.log_level, "debug");
	}

	#[tokio::test]
	async fn test_build_engine_from_file_config() {
		let temp_dir = tempdir().unwrap();
		let config_path = temp_dir.path().join("order-service.toml");

		let config_content = r#"
[service]
id = "test-file-service"

[storage]
primary = "memory"

[storage.implementations.memory]
initial_capacity = 16

[api]
enabled = true
port = 8080
"#;
		std::fs::write(&config_path, config_content).unwrap();

		let config = Config::from_file(&config_path).await.unwrap();
		assert_eq!(config.enabled_api().map(|api| api.port), Some(8080));

		let engine = factory_registry::build_engine_from_config(config).unwrap();
		assert_eq!(engine.config().service.id, "test-file-service");

		let order = engine
			.create()
			.create_order(Some("123"), 100.0)
			.await
			.unwrap();
		assert_eq!(engine.queries().get_order(&order.id).await.unwrap(), order);
	}

	#[tokio::test]
	async fn test_shipped_config_is_valid() {
		let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
			.join("../../config/order-service.toml");
		let config = Config::from_file(&path).await.unwrap();
		assert!(factory_registry::build_engine_from_config(config).is_ok());
	}
}
