pub mod redis_idempotency_registry;
pub mod redis_ledger_store;
