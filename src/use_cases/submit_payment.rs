use crate::domain::payment::PaymentRequest;
use crate::domain::queue::{Deadline, QueueItem};
use crate::infrastructure::queue::bounded_payment_queue::{BoundedPaymentQueue, QueueFullError};

/// C7 Ingress Adapter, submit path: hands the payment to the bounded queue
/// and returns before any processor interaction happens.
#[derive(Clone)]
pub struct SubmitPaymentUseCase {
	queue: BoundedPaymentQueue,
}

impl SubmitPaymentUseCase {
	pub fn new(queue: BoundedPaymentQueue) -> Self {
		Self { queue }
	}

	pub async fn execute(
		&self,
		payment: PaymentRequest,
		deadline: Deadline,
	) -> Result<(), QueueFullError> {
		self.queue.submit(QueueItem { payment, deadline }).await
	}
}
