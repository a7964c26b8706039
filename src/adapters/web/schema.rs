use rust_decimal::Decimal;
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequestBody {
	#[serde(rename = "correlationId")]
	pub correlation_id: Uuid,
	#[serde(with = "rust_decimal::serde::arbitrary_precision")]
	pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct PaymentsSummaryFilter {
	#[serde(with = "time::serde::rfc3339::option", default)]
	pub from: Option<OffsetDateTime>,
	#[serde(with = "time::serde::rfc3339::option", default)]
	pub to: Option<OffsetDateTime>,
}
