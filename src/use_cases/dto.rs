use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Default)]
pub struct SummaryQuery {
	/// Inclusive lower bound; absent means negative infinity.
	pub from: Option<OffsetDateTime>,
	/// Inclusive upper bound; absent means positive infinity.
	pub to: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessorSummary {
	#[serde(rename = "totalRequests")]
	pub total_requests: usize,
	#[serde(rename = "totalAmount", with = "rust_decimal::serde::arbitrary_precision")]
	pub total_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentsSummaryResponse {
	pub default: ProcessorSummary,
	pub fallback: ProcessorSummary,
}
