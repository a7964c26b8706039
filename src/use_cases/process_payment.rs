use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use time::OffsetDateTime;

use crate::domain::health::HealthMonitor;
use crate::domain::idempotency::{IdempotencyError, IdempotencyRegistry};
use crate::domain::ledger::{LedgerError, LedgerStore};
use crate::domain::payment::{PaymentRequest, ProcessedPayment, Processor, ProcessorRequest};
use crate::domain::processor_client::{Outcome, ProcessorClient};
use crate::domain::queue::Deadline;

const MAX_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
	/// Successfully processed and appended to the ledger.
	Processed(Processor),
	/// The correlation id was already claimed; a no-op by design.
	AlreadyClaimed,
	/// Upstream semantically rejected the payment; not retried.
	Rejected,
	/// All attempts were spent (or the deadline fired) with no success.
	Exhausted,
}

#[derive(Debug)]
pub enum ProcessError {
	Idempotency(IdempotencyError),
	/// The processor accepted the payment but the ledger write afterward
	/// failed. The idempotency claim already stands, so this cannot be
	/// retried; it must be surfaced rather than swallowed (§9).
	LedgerWriteFailedAfterSuccess(Processor, LedgerError),
}

impl std::fmt::Display for ProcessError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ProcessError::Idempotency(e) => write!(f, "idempotency claim failed: {e}"),
			ProcessError::LedgerWriteFailedAfterSuccess(p, e) => {
				write!(f, "ledger write after successful {p} POST failed: {e}")
			}
		}
	}
}

impl std::error::Error for ProcessError {}

/// C5 Selector & Retry Loop, composed with the C2 Idempotency Registry
/// claim that must happen before any processor interaction.
pub struct ProcessPaymentUseCase {
	idempotency: Arc<dyn IdempotencyRegistry>,
	health: Arc<HealthMonitor>,
	processor_client: Arc<dyn ProcessorClient>,
	ledger: Arc<dyn LedgerStore>,
}

impl ProcessPaymentUseCase {
	pub fn new(
		idempotency: Arc<dyn IdempotencyRegistry>,
		health: Arc<HealthMonitor>,
		processor_client: Arc<dyn ProcessorClient>,
		ledger: Arc<dyn LedgerStore>,
	) -> Self {
		Self {
			idempotency,
			health,
			processor_client,
			ledger,
		}
	}

	pub async fn execute(
		&self,
		payment: &PaymentRequest,
		deadline: &Deadline,
	) -> Result<ProcessOutcome, ProcessError> {
		let claimed = self
			.idempotency
			.try_claim(payment.correlation_id)
			.await
			.map_err(ProcessError::Idempotency)?;

		if !claimed {
			info!("correlation id {} already claimed, skipping", payment.correlation_id);
			return Ok(ProcessOutcome::AlreadyClaimed);
		}

		self.retry_loop(payment, deadline).await
	}

	async fn retry_loop(
		&self,
		payment: &PaymentRequest,
		deadline: &Deadline,
	) -> Result<ProcessOutcome, ProcessError> {
		let mut use_default = self.health.should_use_default();
		let mut backoff = INITIAL_BACKOFF;

		for attempt in 1..=MAX_ATTEMPTS {
			if deadline.is_expired() {
				return Ok(ProcessOutcome::Exhausted);
			}

			let target = if use_default { Processor::Default } else { Processor::Fallback };
			let request = ProcessorRequest::new(payment, OffsetDateTime::now_utc());

			let outcome = self.processor_client.post(target, &request, deadline).await;

			match outcome {
				Outcome::Success => {
					let record = ProcessedPayment {
						correlation_id: payment.correlation_id,
						amount: payment.amount,
						processed_at: OffsetDateTime::now_utc(),
						processor_used: target,
					};
					return self.ledger.append(&record).await.map(|()| ProcessOutcome::Processed(target)).map_err(|e| {
						ProcessError::LedgerWriteFailedAfterSuccess(target, e)
					});
				}
				Outcome::Rejected => {
					warn!("payment {} rejected by {target}, not retrying", payment.correlation_id);
					return Ok(ProcessOutcome::Rejected);
				}
				Outcome::ServerError | Outcome::Transport => {
					self.health.report_failure(target);
					use_default = !use_default;
				}
				Outcome::Timeout => {
					self.health.report_slowness(target);
				}
			}

			if deadline.is_expired() || attempt == MAX_ATTEMPTS {
				break;
			}

			if deadline.race(tokio::time::sleep(backoff)).await.is_none() {
				break;
			}
			backoff *= 2;
		}

		Ok(ProcessOutcome::Exhausted)
	}
}
