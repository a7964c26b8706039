use async_trait::async_trait;

use crate::domain::payment::{Processor, ProcessorRequest};
use crate::domain::queue::Deadline;

/// Classification of a single POST attempt to an upstream processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	Success,
	/// Semantic refusal by the upstream (e.g. 422). Never retried.
	Rejected,
	/// Upstream 5xx.
	ServerError,
	/// Connection failure or other network error.
	Transport,
	/// The attempt exceeded its deadline.
	Timeout,
}

#[async_trait]
pub trait ProcessorClient: Send + Sync + 'static {
	async fn post(
		&self,
		processor: Processor,
		request: &ProcessorRequest,
		deadline: &Deadline,
	) -> Outcome;
}
