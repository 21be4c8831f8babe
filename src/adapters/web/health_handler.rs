use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, Responder, ResponseError, get, web};
use time::OffsetDateTime;

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::{HealthResponse, MemoryUsage};
use crate::domain::validation_key::ValidationKey;
use crate::use_cases::health_check::HealthCheckUseCase;

#[get("/")]
pub async fn index() -> impl Responder {
	HttpResponse::Ok().body("Wallet relay online")
}

#[get("/health")]
pub async fn health(
	health_check_use_case: web::Data<HealthCheckUseCase>,
) -> impl Responder {
	let report = health_check_use_case.execute();
	HttpResponse::Ok().json(HealthResponse {
		status:    "healthy".to_string(),
		timestamp: OffsetDateTime::now_utc(),
		uptime:    report.uptime_secs,
		memory:    MemoryUsage {
			rss_bytes: report.rss_bytes,
		},
	})
}

#[get("/validation-key.txt")]
pub async fn validation_key(
	key: web::Data<Option<ValidationKey>>,
) -> impl Responder {
	match key.get_ref() {
		Some(key) => HttpResponse::Ok()
			.content_type(ContentType::plaintext())
			.body(key.as_str().to_owned()),
		None => ApiError::NotFoundError.error_response(),
	}
}
