use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, error};
use derive_more::derive::{Display, Error};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorResponse {
	#[serde(rename = "statusCode")]
	status_code: u16,
	error: String,
	message: String,
}

#[derive(Debug, Display, Error)]
pub enum ApiError {
	#[display("Internal server error.")]
	InternalServerError,
	#[display("Request timed out before it could be admitted.")]
	Timeout,
}

impl ApiError {
	pub fn name(&self) -> String {
		match self {
			ApiError::InternalServerError => "Internal Server Error".to_string(),
			ApiError::Timeout => "Gateway Timeout".to_string(),
		}
	}
}

impl error::ResponseError for ApiError {
	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code())
			.content_type(ContentType::json())
			.json(ErrorResponse {
				status_code: self.status_code().as_u16(),
				error: self.to_string(),
				message: self.name(),
			})
	}

	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
			ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
		}
	}
}
