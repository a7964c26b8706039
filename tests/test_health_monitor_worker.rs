use std::sync::Arc;
use std::time::Duration;

use payment_gateway::domain::health::HealthMonitor;
use payment_gateway::infrastructure::workers::health_monitor_worker::run;
use reqwest::Client;
use tokio_util::sync::CancellationToken;

mod support;

use crate::support::payment_processor_container::setup_payment_processors;

#[tokio::test]
async fn adopts_a_healthy_reading_from_both_real_processors() {
	let (default_url, fallback_url, _default_container, _fallback_container) =
		setup_payment_processors().await;

	let monitor = Arc::new(HealthMonitor::new());
	let shutdown = CancellationToken::new();

	let worker = tokio::spawn(run(
		monitor.clone(),
		Client::new(),
		default_url,
		fallback_url,
		shutdown.clone(),
	));

	tokio::time::sleep(Duration::from_secs(7)).await;
	shutdown.cancel();
	worker.await.unwrap();

	assert!(monitor.should_use_default());
}
