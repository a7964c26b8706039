use async_trait::async_trait;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::domain::idempotency::{IdempotencyError, IdempotencyRegistry};

/// Claims live for at least two hours (§3 invariant).
const CLAIM_TTL_SECS: u64 = 2 * 60 * 60;

#[derive(Clone)]
pub struct RedisIdempotencyRegistry {
	client: redis::Client,
}

impl RedisIdempotencyRegistry {
	pub fn new(client: redis::Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl IdempotencyRegistry for RedisIdempotencyRegistry {
	async fn try_claim(&self, correlation_id: Uuid) -> Result<bool, IdempotencyError> {
		let mut con = self.client.get_multiplexed_async_connection().await?;

		let key = format!("paid:{correlation_id}");
		let won: bool = redis::cmd("SET")
			.arg(&key)
			.arg(1)
			.arg("NX")
			.arg("EX")
			.arg(CLAIM_TTL_SECS)
			.query_async::<Option<String>>(&mut con)
			.await?
			.is_some();

		Ok(won)
	}
}
