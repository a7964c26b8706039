use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::domain::payment::PaymentRequest;

/// A deadline carries both a hard expiry and the submitter's cooperative
/// abort signal. Every suspension point in the pipeline races against it.
#[derive(Clone)]
pub struct Deadline {
	expires_at: Instant,
	abort: CancellationToken,
}

impl Deadline {
	pub fn after(duration: Duration, abort: CancellationToken) -> Self {
		Self {
			expires_at: Instant::now() + duration,
			abort,
		}
	}

	pub fn remaining(&self) -> Duration {
		self.expires_at.saturating_duration_since(Instant::now())
	}

	pub fn is_expired(&self) -> bool {
		Instant::now() >= self.expires_at || self.abort.is_cancelled()
	}

	/// Waits for `fut`, racing it against the time budget and the submitter's
	/// abort signal. `None` means the deadline won and `fut` was dropped.
	pub async fn race<F, T>(&self, fut: F) -> Option<T>
	where
		F: std::future::Future<Output = T>,
	{
		tokio::select! {
			res = fut => Some(res),
			_ = tokio::time::sleep(self.remaining()) => None,
			_ = self.abort.cancelled() => None,
		}
	}

	/// Same as `race`, but also bound by a second, independent cancellation
	/// (the worker's own shutdown signal). The effective deadline is the
	/// earlier of the two — whichever cancels first wins.
	pub async fn race_with<F, T>(&self, worker_shutdown: &CancellationToken, fut: F) -> Option<T>
	where
		F: std::future::Future<Output = T>,
	{
		tokio::select! {
			res = fut => Some(res),
			_ = tokio::time::sleep(self.remaining()) => None,
			_ = self.abort.cancelled() => None,
			_ = worker_shutdown.cancelled() => None,
		}
	}
}

/// One unit of work handed from the ingress adapter to the worker pool.
pub struct QueueItem {
	pub payment: PaymentRequest,
	pub deadline: Deadline,
}
