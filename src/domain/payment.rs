use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Which upstream processor handled (or should handle) a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Processor {
	Default,
	Fallback,
}

impl Processor {
	pub fn other(self) -> Processor {
		match self {
			Processor::Default => Processor::Fallback,
			Processor::Fallback => Processor::Default,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Processor::Default => "default",
			Processor::Fallback => "fallback",
		}
	}
}

impl std::fmt::Display for Processor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Supplied by the client. Immutable once accepted at ingress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
	pub correlation_id: Uuid,
	#[serde(with = "rust_decimal::serde::arbitrary_precision")]
	pub amount: Decimal,
}

/// Built fresh just before each processor POST attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorRequest {
	#[serde(rename = "correlationId")]
	pub correlation_id: Uuid,
	#[serde(with = "rust_decimal::serde::arbitrary_precision")]
	pub amount: Decimal,
	#[serde(rename = "requestedAt", with = "time::serde::rfc3339")]
	pub requested_at: OffsetDateTime,
}

impl ProcessorRequest {
	pub fn new(payment: &PaymentRequest, requested_at: OffsetDateTime) -> Self {
		Self {
			correlation_id: payment.correlation_id,
			amount: payment.amount,
			requested_at,
		}
	}
}

/// A successfully processed payment, written exactly once per correlation id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedPayment {
	pub correlation_id: Uuid,
	#[serde(with = "rust_decimal::serde::arbitrary_precision")]
	pub amount: Decimal,
	#[serde(with = "time::serde::rfc3339")]
	pub processed_at: OffsetDateTime,
	pub processor_used: Processor,
}

impl ProcessedPayment {
	pub fn score_ms(&self) -> i64 {
		(self.processed_at.unix_timestamp_nanos() / 1_000_000) as i64
	}
}
