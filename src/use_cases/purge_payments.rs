use std::sync::Arc;

use crate::domain::ledger::{LedgerError, LedgerStore};

/// Supplemental maintenance operation, not part of the ingress API proper
/// (§4 of SPEC_FULL.md) — resets the ledger between test/bench runs.
#[derive(Clone)]
pub struct PurgePaymentsUseCase {
	ledger: Arc<dyn LedgerStore>,
}

impl PurgePaymentsUseCase {
	pub fn new(ledger: Arc<dyn LedgerStore>) -> Self {
		Self { ledger }
	}

	pub async fn execute(&self) -> Result<(), LedgerError> {
		self.ledger.clear().await
	}
}
