use async_trait::async_trait;
use redis::AsyncCommands;

use crate::domain::ledger::{LedgerError, LedgerStore};
use crate::domain::payment::ProcessedPayment;

const PAYMENTS_ZSET_KEY: &str = "payments";

#[derive(Clone)]
pub struct RedisLedgerStore {
	client: redis::Client,
}

impl RedisLedgerStore {
	pub fn new(client: redis::Client) -> Self {
		Self { client }
	}

	fn score_bound(value: i64) -> String {
		if value == i64::MIN {
			"-inf".to_string()
		} else if value == i64::MAX {
			"+inf".to_string()
		} else {
			value.to_string()
		}
	}
}

#[async_trait]
impl LedgerStore for RedisLedgerStore {
	async fn append(&self, record: &ProcessedPayment) -> Result<(), LedgerError> {
		let mut con = self.client.get_multiplexed_async_connection().await?;

		let member = serde_json::to_string(record)?;
		let _: () = con
			.zadd(PAYMENTS_ZSET_KEY, member, record.score_ms())
			.await?;

		Ok(())
	}

	async fn range_by_score(
		&self,
		from_ms: i64,
		to_ms: i64,
	) -> Result<Vec<ProcessedPayment>, LedgerError> {
		let mut con = self.client.get_multiplexed_async_connection().await?;

		let members: Vec<String> = con
			.zrangebyscore(
				PAYMENTS_ZSET_KEY,
				Self::score_bound(from_ms),
				Self::score_bound(to_ms),
			)
			.await?;

		members
			.into_iter()
			.map(|m| serde_json::from_str(&m).map_err(LedgerError::from))
			.collect()
	}

	async fn clear(&self) -> Result<(), LedgerError> {
		let mut con = self.client.get_multiplexed_async_connection().await?;
		let _: () = con.del(PAYMENTS_ZSET_KEY).await?;
		Ok(())
	}
}
