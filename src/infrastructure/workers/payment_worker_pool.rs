use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};

use crate::infrastructure::queue::bounded_payment_queue::BoundedPaymentQueue;
use crate::use_cases::process_payment::{ProcessError, ProcessOutcome, ProcessPaymentUseCase};

/// Bounded deadline for queue drain during graceful shutdown (§4.6). The
/// caller is responsible for racing `join_all(handles)` against this.
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Spawns `worker_count` tasks that continuously dequeue one item at a time
/// and run the selector/retry loop for it. A worker exits once the queue is
/// closed (producer side shut down) and fully drained.
pub fn spawn(
	worker_count: usize,
	queue: BoundedPaymentQueue,
	process_payment: Arc<ProcessPaymentUseCase>,
) -> Vec<tokio::task::JoinHandle<()>> {
	(0..worker_count)
		.map(|id| {
			let queue = queue.clone();
			let process_payment = process_payment.clone();
			tokio::spawn(async move { worker_loop(id, queue, process_payment).await })
		})
		.collect()
}

async fn worker_loop(id: usize, queue: BoundedPaymentQueue, process_payment: Arc<ProcessPaymentUseCase>) {
	while let Some(item) = queue.pop().await {
		let correlation_id = item.payment.correlation_id;
		match process_payment.execute(&item.payment, &item.deadline).await {
			Ok(ProcessOutcome::Processed(processor)) => {
				info!("payment {correlation_id} processed by {processor}");
			}
			Ok(ProcessOutcome::AlreadyClaimed) => {}
			Ok(ProcessOutcome::Rejected) => {
				warn!("payment {correlation_id} rejected by upstream, dropped");
			}
			Ok(ProcessOutcome::Exhausted) => {
				warn!("payment {correlation_id} exhausted all attempts, dropped");
			}
			Err(ProcessError::Idempotency(e)) => {
				error!("idempotency claim failed for {correlation_id}: {e}");
			}
			Err(ProcessError::LedgerWriteFailedAfterSuccess(processor, e)) => {
				error!(
					"payment {correlation_id} processed by {processor} but ledger write \
					 failed, record is lost: {e}"
				);
			}
		}
	}
	info!("worker {id} stopping: queue closed and drained");
}
