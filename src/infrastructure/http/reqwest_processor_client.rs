use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::StatusCode;

use crate::domain::payment::{Processor, ProcessorRequest};
use crate::domain::processor_client::{Outcome, ProcessorClient};
use crate::domain::queue::Deadline;

/// Per-request total timeout cap, independent of (and usually larger than)
/// the caller's own deadline — the caller's deadline always wins if smaller.
const REQUEST_TIMEOUT_CAP: Duration = Duration::from_secs(30);
const MAX_CONNECTIONS_PER_HOST: usize = 100;

pub struct ReqwestProcessorClient {
	http: reqwest::Client,
	default_base_url: String,
	fallback_base_url: String,
}

impl ReqwestProcessorClient {
	pub fn new(default_base_url: String, fallback_base_url: String) -> Self {
		let http = reqwest::Client::builder()
			.pool_max_idle_per_host(MAX_CONNECTIONS_PER_HOST)
			.timeout(REQUEST_TIMEOUT_CAP)
			.cookie_store(false)
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.expect("processor HTTP client configuration is valid");

		Self {
			http,
			default_base_url,
			fallback_base_url,
		}
	}

	fn base_url(&self, processor: Processor) -> &str {
		match processor {
			Processor::Default => &self.default_base_url,
			Processor::Fallback => &self.fallback_base_url,
		}
	}
}

#[async_trait]
impl ProcessorClient for ReqwestProcessorClient {
	async fn post(
		&self,
		processor: Processor,
		request: &ProcessorRequest,
		deadline: &Deadline,
	) -> Outcome {
		let url = format!("{}/payments", self.base_url(processor));
		let attempt_timeout = deadline.remaining().min(REQUEST_TIMEOUT_CAP);

		let send = self
			.http
			.post(&url)
			.timeout(attempt_timeout)
			.json(request)
			.send();

		let Some(result) = deadline.race(send).await else {
			return Outcome::Timeout;
		};

		match result {
			Ok(resp) if resp.status().is_success() => Outcome::Success,
			Ok(resp) if resp.status() == StatusCode::UNPROCESSABLE_ENTITY => {
				Outcome::Rejected
			}
			Ok(resp) if resp.status().is_server_error() => Outcome::ServerError,
			Ok(resp) => {
				error!(
					"processor {processor} returned unexpected status {}",
					resp.status()
				);
				Outcome::ServerError
			}
			Err(e) if e.is_timeout() => Outcome::Timeout,
			Err(e) => {
				error!("transport error calling processor {processor}: {e}");
				Outcome::Transport
			}
		}
	}
}
