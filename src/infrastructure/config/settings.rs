use std::time::Duration;

use config::Environment;
use serde::Deserialize;

/// Recognized environment configuration (§6). These map one-to-one onto the
/// env var names the spec names, with no prefix — `config::Environment`'s
/// default separator ("_") already matches the snake_case field names.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
	pub redis_endpoint: String,
	pub payment_processor_url_default: String,
	pub payment_processor_url_fallback: String,
}

impl Config {
	/// Keep-alive idle close.
	pub const KEEP_ALIVE: Duration = Duration::from_secs(2);
	/// Request-header timeout.
	pub const HEADER_TIMEOUT: Duration = Duration::from_secs(2);
	/// Max request body size.
	pub const MAX_BODY_BYTES: usize = 64 * 1024;
	/// Per-request processing timeout, also the ingress admission deadline.
	pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

	pub fn load() -> Result<Self, config::ConfigError> {
		Self::load_from(Environment::default())
	}

	fn load_from(environment: Environment) -> Result<Self, config::ConfigError> {
		let config_builder = config::Config::builder()
			.set_default("redis_endpoint", "redis:6379")?
			.add_source(environment)
			.build()?;

		config_builder.try_deserialize()
	}

	pub fn redis_url(&self) -> String {
		format!("redis://{}", self.redis_endpoint)
	}
}
