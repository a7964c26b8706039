use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use log::{info, warn};
use reqwest::Client;
use tokio_util::sync::CancellationToken;

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod use_cases;

use crate::adapters::web::handlers::{payments, payments_purge, payments_summary};
use crate::domain::health::HealthMonitor;
use crate::domain::idempotency::IdempotencyRegistry;
use crate::domain::ledger::LedgerStore;
use crate::domain::processor_client::ProcessorClient;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::http::reqwest_processor_client::ReqwestProcessorClient;
use crate::infrastructure::persistence::redis_idempotency_registry::RedisIdempotencyRegistry;
use crate::infrastructure::persistence::redis_ledger_store::RedisLedgerStore;
use crate::infrastructure::queue::bounded_payment_queue::BoundedPaymentQueue;
use crate::infrastructure::workers::{health_monitor_worker, payment_worker_pool};
use crate::use_cases::get_summary::GetSummaryUseCase;
use crate::use_cases::process_payment::ProcessPaymentUseCase;
use crate::use_cases::purge_payments::PurgePaymentsUseCase;
use crate::use_cases::submit_payment::SubmitPaymentUseCase;

pub async fn run(config: Arc<Config>) -> std::io::Result<()> {
	env_logger::init();

	let redis_client = redis::Client::open(config.redis_url()).expect("Invalid Redis URL");
	let http_client = Client::new();
	let shutdown = CancellationToken::new();

	let health_monitor = Arc::new(HealthMonitor::new());
	let ledger: Arc<dyn LedgerStore> = Arc::new(RedisLedgerStore::new(redis_client.clone()));
	let idempotency: Arc<dyn IdempotencyRegistry> =
		Arc::new(RedisIdempotencyRegistry::new(redis_client.clone()));
	let processor_client: Arc<dyn ProcessorClient> = Arc::new(ReqwestProcessorClient::new(
		config.payment_processor_url_default.clone(),
		config.payment_processor_url_fallback.clone(),
	));

	info!("starting health monitor...");
	tokio::spawn(health_monitor_worker::run(
		health_monitor.clone(),
		http_client.clone(),
		config.payment_processor_url_default.clone(),
		config.payment_processor_url_fallback.clone(),
		shutdown.clone(),
	));

	info!("starting payment worker pool...");
	let queue = BoundedPaymentQueue::new();
	let process_payment = Arc::new(ProcessPaymentUseCase::new(
		idempotency,
		health_monitor,
		processor_client,
		ledger.clone(),
	));
	let worker_count = num_cpus::get();
	let worker_handles = payment_worker_pool::spawn(worker_count, queue.clone(), process_payment);

	let submit_payment = SubmitPaymentUseCase::new(queue.clone());
	let get_summary = GetSummaryUseCase::new(ledger.clone());
	let purge_payments = PurgePaymentsUseCase::new(ledger);

	info!("starting HTTP server on 0.0.0.0:9999 with {worker_count} payment workers...");

	let server = HttpServer::new(move || {
		App::new()
			.app_data(web::Data::new(submit_payment.clone()))
			.app_data(web::Data::new(get_summary.clone()))
			.app_data(web::Data::new(purge_payments.clone()))
			.service(payments)
			.service(payments_summary)
			.service(payments_purge)
	})
	.keep_alive(Config::KEEP_ALIVE)
	.client_request_timeout(Config::HEADER_TIMEOUT)
	.bind(("0.0.0.0", 9999))?
	.run();

	let server_handle = server.handle();
	tokio::spawn(shutdown_on_ctrl_c(shutdown, queue, worker_handles, server_handle));

	server.await
}

/// Waits for a ctrl-c/SIGTERM, stops the health monitor, closes the queue so
/// workers drain and exit on their own, then tells the HTTP server to stop
/// accepting connections. Bounded by `payment_worker_pool::DRAIN_TIMEOUT`: a
/// worker pool that never drains must not block shutdown forever.
async fn shutdown_on_ctrl_c(
	shutdown: CancellationToken,
	queue: BoundedPaymentQueue,
	worker_handles: Vec<tokio::task::JoinHandle<()>>,
	server_handle: actix_web::dev::ServerHandle,
) {
	if tokio::signal::ctrl_c().await.is_err() {
		return;
	}
	info!("shutdown signal received, draining in-flight payments...");

	shutdown.cancel();
	queue.close();

	let drain = futures::future::join_all(worker_handles);
	if tokio::time::timeout(payment_worker_pool::DRAIN_TIMEOUT, drain).await.is_err() {
		warn!("worker pool did not drain within the shutdown deadline, stopping anyway");
	}

	server_handle.stop(true).await;
}
