use std::time::Duration;

use actix_web::{HttpResponse, Responder, ResponseError, get, post, web};
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::{PaymentRequestBody, PaymentsSummaryFilter};
use crate::domain::payment::PaymentRequest;
use crate::domain::queue::Deadline;
use crate::infrastructure::queue::bounded_payment_queue::QueueFullError;
use crate::use_cases::dto::SummaryQuery;
use crate::use_cases::get_summary::GetSummaryUseCase;
use crate::use_cases::purge_payments::PurgePaymentsUseCase;
use crate::use_cases::submit_payment::SubmitPaymentUseCase;

/// Per-request processing timeout, also the ingress admission deadline
/// (§5, §6).
const INGRESS_DEADLINE: Duration = Duration::from_secs(2);

#[post("/payments")]
pub async fn payments(
	payload: web::Json<PaymentRequestBody>,
	submit_payment: web::Data<SubmitPaymentUseCase>,
) -> impl Responder {
	let payment = PaymentRequest {
		correlation_id: payload.correlation_id,
		amount: payload.amount,
	};
	let deadline = Deadline::after(INGRESS_DEADLINE, CancellationToken::new());

	match submit_payment.execute(payment, deadline).await {
		Ok(()) => {
			info!("payment {} accepted", payload.correlation_id);
			HttpResponse::Accepted()
				.insert_header(("Server", "rinha"))
				.finish()
		}
		Err(QueueFullError::DeadlineExceeded) => {
			warn!("payment {} timed out waiting for admission", payload.correlation_id);
			ApiError::Timeout.error_response()
		}
		Err(QueueFullError::Closed) => {
			warn!("payment {} rejected: ingress is shutting down", payload.correlation_id);
			ApiError::InternalServerError.error_response()
		}
	}
}

#[get("/payments-summary")]
pub async fn payments_summary(
	filter: web::Query<PaymentsSummaryFilter>,
	get_summary: web::Data<GetSummaryUseCase>,
) -> impl Responder {
	let query = SummaryQuery { from: filter.from, to: filter.to };

	match get_summary.execute(query).await {
		Ok(summary) => HttpResponse::Ok()
			.insert_header(("Server", "rinha"))
			.json(summary),
		Err(e) => {
			warn!("failed to compute payments summary: {e}");
			ApiError::InternalServerError.error_response()
		}
	}
}

#[post("/payments-purge")]
pub async fn payments_purge(purge_payments: web::Data<PurgePaymentsUseCase>) -> impl Responder {
	match purge_payments.execute().await {
		Ok(()) => HttpResponse::Ok().finish(),
		Err(e) => {
			warn!("failed to purge payments: {e}");
			ApiError::InternalServerError.error_response()
		}
	}
}
