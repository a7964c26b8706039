pub mod health;
pub mod idempotency;
pub mod ledger;
pub mod payment;
pub mod processor_client;
pub mod queue;
