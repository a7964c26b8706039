use async_trait::async_trait;

use crate::domain::payment::ProcessedPayment;

pub type LedgerError = Box<dyn std::error::Error + Send + Sync>;

/// Time-scored ordered collection of processed payments, keyed by a single
/// logical name (`payments`). Score is `processed_at` in epoch milliseconds.
#[async_trait]
pub trait LedgerStore: Send + Sync + 'static {
	/// Insert the record at its own `processed_at` score. Duplicate scores
	/// are permitted; logical uniqueness is enforced by the idempotency
	/// registry, not here.
	async fn append(&self, record: &ProcessedPayment) -> Result<(), LedgerError>;

	/// Inclusive range scan in score order.
	async fn range_by_score(
		&self,
		from_ms: i64,
		to_ms: i64,
	) -> Result<Vec<ProcessedPayment>, LedgerError>;

	/// Drops every record. Not part of the external payment API; used by the
	/// `/payments-purge` maintenance endpoint for test/bench resets.
	async fn clear(&self) -> Result<(), LedgerError>;
}
