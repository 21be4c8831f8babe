use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, error};
use derive_more::derive::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::domain::errors::RelayError;

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
	#[serde(rename = "statusCode")]
	pub status_code: u16,
	pub error:       String,
	pub message:     String,
}

#[derive(Debug, Display, Error)]
pub enum ApiError {
	#[display("Payment not found.")]
	PaymentNotFoundError,
	#[display("Payment cannot move to the requested state.")]
	TransitionError,
	#[display("Request data is invalid.")]
	BadClientDataError,
	#[display("Resource not found.")]
	NotFoundError,
	#[display("Internal server error.")]
	InternalServerError,
}

impl ApiError {
	pub fn name(&self) -> String {
		match self {
			ApiError::PaymentNotFoundError => "Not Found".to_string(),
			ApiError::TransitionError => "Conflict".to_string(),
			ApiError::BadClientDataError => "Bad request".to_string(),
			ApiError::NotFoundError => "Not Found".to_string(),
			ApiError::InternalServerError => "Internal Server Error".to_string(),
		}
	}
}

impl error::ResponseError for ApiError {
	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code())
			.content_type(ContentType::json())
			.json(ErrorResponse {
				status_code: self.status_code().as_u16(),
				error:       self.to_string(),
				message:     self.name(),
			})
	}

	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::PaymentNotFoundError => StatusCode::NOT_FOUND,
			ApiError::TransitionError => StatusCode::CONFLICT,
			ApiError::BadClientDataError => StatusCode::BAD_REQUEST,
			ApiError::NotFoundError => StatusCode::NOT_FOUND,
			ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<RelayError> for ApiError {
	fn from(err: RelayError) -> Self {
		match err {
			RelayError::PaymentNotFound { .. } => ApiError::PaymentNotFoundError,
			RelayError::InvalidTransition { .. } | RelayError::TxidMismatch { .. } => {
				ApiError::TransitionError
			}
			RelayError::UnknownStatus { .. } => ApiError::BadClientDataError,
			RelayError::Storage { .. } => ApiError::InternalServerError,
		}
	}
}
