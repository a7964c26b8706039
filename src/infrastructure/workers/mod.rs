pub mod health_monitor_worker;
pub mod payment_worker_pool;
