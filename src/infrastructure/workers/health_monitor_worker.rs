use std::sync::Arc;
use std::time::Duration;

use log::{error, warn};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::domain::health::HealthMonitor;
use crate::domain::payment::Processor;

/// Scheduler period. The monitor's own `lastPollAt` gate still enforces the
/// upstream's stricter ≤1 call / 5s / endpoint limit even if this fires
/// early.
const POLL_INTERVAL: Duration = Duration::from_secs(6);

#[derive(Deserialize)]
struct HealthResponse {
	failing: bool,
	#[serde(rename = "minResponseTime")]
	min_response_time: u64,
}

/// Background task: periodically polls both processors' health endpoints and
/// adopts the result into the shared `HealthMonitor`.
pub async fn run(
	monitor: Arc<HealthMonitor>,
	http: reqwest::Client,
	default_url: String,
	fallback_url: String,
	shutdown: CancellationToken,
) {
	let targets = [(Processor::Default, default_url), (Processor::Fallback, fallback_url)];

	let mut ticker = tokio::time::interval(POLL_INTERVAL);
	loop {
		tokio::select! {
			_ = ticker.tick() => {}
			_ = shutdown.cancelled() => return,
		}

		let now_ms = now_millis();
		if !monitor.try_begin_poll(now_ms) {
			continue;
		}

		for (processor, base_url) in &targets {
			poll_one(&monitor, &http, *processor, base_url).await;
		}
	}
}

async fn poll_one(
	monitor: &HealthMonitor,
	http: &reqwest::Client,
	processor: Processor,
	base_url: &str,
) {
	let url = format!("{base_url}/payments/service-health");
	match http.get(&url).send().await {
		Ok(resp) if resp.status().is_success() => match resp.json::<HealthResponse>().await {
			Ok(body) => monitor.adopt(processor, body.failing, body.min_response_time),
			Err(e) => {
				error!("health response from {processor} was not parseable: {e}");
				monitor.report_failure(processor);
			}
		},
		Ok(resp) => {
			warn!("health check for {processor} returned status {}", resp.status());
			monitor.report_failure(processor);
		}
		Err(e) => {
			error!("health check for {processor} failed: {e}");
			monitor.report_failure(processor);
		}
	}
}

fn now_millis() -> i64 {
	time::OffsetDateTime::now_utc().unix_timestamp() * 1000
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn deserializes_health_response() {
		let body: HealthResponse =
			serde_json::from_str(r#"{"failing":false,"minResponseTime":42}"#).unwrap();
		assert!(!body.failing);
		assert_eq!(body.min_response_time, 42);
	}
}
