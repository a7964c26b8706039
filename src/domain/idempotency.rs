use async_trait::async_trait;
use uuid::Uuid;

pub type IdempotencyError = Box<dyn std::error::Error + Send + Sync>;

/// The only synchronization edge that matters for at-most-once ledger
/// writes: an atomic set-if-absent on the client's correlation id.
#[async_trait]
pub trait IdempotencyRegistry: Send + Sync + 'static {
	/// Atomically claim `correlation_id` with a long TTL. Returns `true` iff
	/// the caller won the claim; callers seeing `false` must not process the
	/// payment further — it has been or is being handled elsewhere.
	async fn try_claim(&self, correlation_id: Uuid) -> Result<bool, IdempotencyError>;
}
