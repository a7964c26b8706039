use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::ledger::{LedgerError, LedgerStore};
use crate::domain::payment::Processor;
use crate::use_cases::dto::{PaymentsSummaryResponse, ProcessorSummary, SummaryQuery};

/// C7 Ingress Adapter, summary path: range-scans the ledger and aggregates
/// per-processor totals. `from`/`to` default to -infinity/+infinity.
#[derive(Clone)]
pub struct GetSummaryUseCase {
	ledger: Arc<dyn LedgerStore>,
}

impl GetSummaryUseCase {
	pub fn new(ledger: Arc<dyn LedgerStore>) -> Self {
		Self { ledger }
	}

	pub async fn execute(
		&self,
		query: SummaryQuery,
	) -> Result<PaymentsSummaryResponse, LedgerError> {
		let from_ms = query
			.from
			.map(|t| (t.unix_timestamp_nanos() / 1_000_000) as i64)
			.unwrap_or(i64::MIN);
		let to_ms = query
			.to
			.map(|t| (t.unix_timestamp_nanos() / 1_000_000) as i64)
			.unwrap_or(i64::MAX);

		let records = self.ledger.range_by_score(from_ms, to_ms).await?;

		let mut default = ProcessorSummary { total_requests: 0, total_amount: Decimal::ZERO };
		let mut fallback = ProcessorSummary { total_requests: 0, total_amount: Decimal::ZERO };

		for record in &records {
			let bucket = match record.processor_used {
				Processor::Default => &mut default,
				Processor::Fallback => &mut fallback,
			};
			bucket.total_requests += 1;
			bucket.total_amount += record.amount;
		}

		Ok(PaymentsSummaryResponse { default, fallback })
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Mutex;

	use async_trait::async_trait;
	use time::OffsetDateTime;
	use uuid::Uuid;

	use super::*;
	use crate::domain::payment::ProcessedPayment;

	struct FixedLedger(Vec<ProcessedPayment>);

	#[async_trait]
	impl LedgerStore for FixedLedger {
		async fn append(&self, _record: &ProcessedPayment) -> Result<(), LedgerError> {
			unreachable!("summary use case never appends")
		}

		async fn range_by_score(&self, from_ms: i64, to_ms: i64) -> Result<Vec<ProcessedPayment>, LedgerError> {
			Ok(self
				.0
				.iter()
				.filter(|r| {
					let score = (r.processed_at.unix_timestamp_nanos() / 1_000_000) as i64;
					score >= from_ms && score <= to_ms
				})
				.cloned()
				.collect())
		}

		async fn clear(&self) -> Result<(), LedgerError> {
			unreachable!("summary use case never clears")
		}
	}

	fn record(processor: Processor, amount: &str, at: OffsetDateTime) -> ProcessedPayment {
		ProcessedPayment {
			correlation_id: Uuid::new_v4(),
			amount: amount.parse().unwrap(),
			processed_at: at,
			processor_used: processor,
		}
	}

	#[tokio::test]
	async fn aggregates_per_processor_counts_and_exact_sums() {
		let now = OffsetDateTime::now_utc();
		let ledger = FixedLedger(vec![
			record(Processor::Default, "10.00", now),
			record(Processor::Default, "5.33", now),
			record(Processor::Fallback, "0.01", now),
		]);
		let use_case = GetSummaryUseCase::new(Arc::new(ledger));

		let summary = use_case.execute(SummaryQuery::default()).await.unwrap();

		assert_eq!(summary.default.total_requests, 2);
		assert_eq!(summary.default.total_amount, "15.33".parse::<Decimal>().unwrap());
		assert_eq!(summary.fallback.total_requests, 1);
		assert_eq!(summary.fallback.total_amount, "0.01".parse::<Decimal>().unwrap());
	}

	#[tokio::test]
	async fn unbounded_query_covers_everything() {
		let base = OffsetDateTime::from_unix_timestamp(0).unwrap();
		let ledger = FixedLedger(vec![
			record(Processor::Default, "1", base + time::Duration::seconds(1)),
			record(Processor::Default, "2", base + time::Duration::seconds(2)),
			record(Processor::Default, "3", base + time::Duration::seconds(3)),
		]);
		let use_case = GetSummaryUseCase::new(Arc::new(ledger));

		let summary = use_case.execute(SummaryQuery { from: None, to: None }).await.unwrap();
		assert_eq!(summary.default.total_requests, 3);
	}

	#[tokio::test]
	async fn range_bounds_are_inclusive() {
		let base = OffsetDateTime::from_unix_timestamp(0).unwrap();
		let t1 = base + time::Duration::seconds(1);
		let t2 = base + time::Duration::seconds(2);
		let t3 = base + time::Duration::seconds(3);
		let ledger = FixedLedger(vec![
			record(Processor::Default, "1", t1),
			record(Processor::Default, "2", t2),
			record(Processor::Default, "3", t3),
		]);
		let use_case = GetSummaryUseCase::new(Arc::new(ledger));

		let summary = use_case
			.execute(SummaryQuery { from: Some(t2), to: Some(t2) })
			.await
			.unwrap();
		assert_eq!(summary.default.total_requests, 1);
		assert_eq!(summary.default.total_amount, Decimal::from(2));
	}
}
