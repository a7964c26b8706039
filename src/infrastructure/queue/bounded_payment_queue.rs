use crate::domain::queue::QueueItem;

/// The core's single admission-control primitive (§5, §4.6): a bounded,
/// multi-producer multi-consumer channel with block-on-full admission. Not
/// persisted — items in flight at a hard shutdown are lost, per the stated
/// non-goals.
pub const CAPACITY: usize = 1000;

#[derive(Clone)]
pub struct BoundedPaymentQueue {
	sender: async_channel::Sender<QueueItem>,
	receiver: async_channel::Receiver<QueueItem>,
}

impl BoundedPaymentQueue {
	pub fn new() -> Self {
		let (sender, receiver) = async_channel::bounded(CAPACITY);
		Self { sender, receiver }
	}

	/// Enqueues `item`, suspending (backpressure) while the queue is full.
	/// Races against the item's own deadline: if the deadline fires first,
	/// admission fails and the caller should surface a timeout to the
	/// client.
	pub async fn submit(&self, item: QueueItem) -> Result<(), QueueFullError> {
		let deadline = item.deadline.clone();
		match deadline.race(self.sender.send(item)).await {
			Some(Ok(())) => Ok(()),
			Some(Err(_)) => Err(QueueFullError::Closed),
			None => Err(QueueFullError::DeadlineExceeded),
		}
	}

	/// Closes the producer side: no further `submit` calls will succeed once
	/// queued items are consumed and the channel drains.
	pub fn close(&self) {
		self.sender.close();
	}

	pub async fn pop(&self) -> Option<QueueItem> {
		self.receiver.recv().await.ok()
	}

	pub fn len(&self) -> usize {
		self.sender.len()
	}
}

impl Default for BoundedPaymentQueue {
	fn default() -> Self {
		Self::new()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueFullError {
	/// The submitter's deadline fired before admission completed.
	DeadlineExceeded,
	/// The queue has been shut down and is no longer accepting work.
	Closed,
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::time::Duration;

	use tokio_util::sync::CancellationToken;

	use super::*;
	use crate::domain::payment::PaymentRequest;
	use crate::domain::queue::Deadline;

	fn item() -> QueueItem {
		QueueItem {
			payment: PaymentRequest {
				correlation_id: uuid::Uuid::new_v4(),
				amount: rust_decimal::Decimal::new(1000, 2),
			},
			deadline: Deadline::after(Duration::from_millis(50), CancellationToken::new()),
		}
	}

	#[tokio::test]
	async fn submit_then_pop_round_trips() {
		let queue = BoundedPaymentQueue::new();
		let id = item().payment.correlation_id;
		queue.submit(item()).await.unwrap();
		let popped = queue.pop().await.unwrap();
		assert_eq!(popped.payment.correlation_id, id);
	}

	#[tokio::test]
	async fn submit_times_out_when_queue_stays_full() {
		let queue = Arc::new(BoundedPaymentQueue::new());
		for _ in 0..CAPACITY {
			queue
				.submit(QueueItem {
					payment: PaymentRequest {
						correlation_id: uuid::Uuid::new_v4(),
						amount: rust_decimal::Decimal::new(1000, 2),
					},
					deadline: Deadline::after(Duration::from_secs(5), CancellationToken::new()),
				})
				.await
				.unwrap();
		}

		let result = queue.submit(item()).await;
		assert_eq!(result, Err(QueueFullError::DeadlineExceeded));
	}
}
