use std::time::Instant;

use actix_web::web;
use log::warn;

use crate::adapters::web::Repository;
use crate::adapters::web::errors::ApiError;
use crate::adapters::web::handlers;
use crate::domain::policy::TransitionPolicy;
use crate::domain::validation_key::ValidationKey;
use crate::use_cases::approve_payment::ApprovePaymentUseCase;
use crate::use_cases::authenticate::AuthenticateUseCase;
use crate::use_cases::complete_payment::CompletePaymentUseCase;
use crate::use_cases::create_payment::CreatePaymentUseCase;
use crate::use_cases::get_payment::GetPaymentUseCase;
use crate::use_cases::health_check::HealthCheckUseCase;
use crate::use_cases::record_callback::RecordCallbackUseCase;

/// Use cases shared by every worker, plus the route table that serves them.
#[derive(Clone)]
pub struct RelayServices {
	create_payment:   web::Data<CreatePaymentUseCase<Repository>>,
	approve_payment:  web::Data<ApprovePaymentUseCase<Repository>>,
	complete_payment: web::Data<CompletePaymentUseCase<Repository>>,
	record_callback:  web::Data<RecordCallbackUseCase<Repository>>,
	get_payment:      web::Data<GetPaymentUseCase<Repository>>,
	authenticate:     web::Data<AuthenticateUseCase>,
	health_check:     web::Data<HealthCheckUseCase>,
	validation_key:   web::Data<Option<ValidationKey>>,
}

impl RelayServices {
	pub fn new(
		payment_repo: Repository,
		policy: TransitionPolicy,
		validation_key: Option<ValidationKey>,
		started_at: Instant,
	) -> Self {
		Self {
			create_payment:   web::Data::new(CreatePaymentUseCase::new(
				payment_repo.clone(),
			)),
			approve_payment:  web::Data::new(ApprovePaymentUseCase::new(
				payment_repo.clone(),
				policy,
			)),
			complete_payment: web::Data::new(CompletePaymentUseCase::new(
				payment_repo.clone(),
				policy,
			)),
			record_callback:  web::Data::new(RecordCallbackUseCase::new(
				payment_repo.clone(),
			)),
			get_payment:      web::Data::new(GetPaymentUseCase::new(payment_repo)),
			authenticate:     web::Data::new(AuthenticateUseCase::new()),
			health_check:     web::Data::new(HealthCheckUseCase::new(started_at)),
			validation_key:   web::Data::new(validation_key),
		}
	}

	pub fn configure(&self, cfg: &mut web::ServiceConfig) {
		cfg.app_data(json_config())
			.app_data(self.create_payment.clone())
			.app_data(self.approve_payment.clone())
			.app_data(self.complete_payment.clone())
			.app_data(self.record_callback.clone())
			.app_data(self.get_payment.clone())
			.app_data(self.authenticate.clone())
			.app_data(self.health_check.clone())
			.app_data(self.validation_key.clone())
			.service(handlers::index)
			.service(handlers::health)
			.service(handlers::validation_key)
			.service(handlers::authenticate)
			.service(handlers::create_payment)
			.service(handlers::approve_payment)
			.service(handlers::complete_payment)
			.service(handlers::payment_callback)
			.service(handlers::payment_details);
	}
}

fn json_config() -> web::JsonConfig {
	web::JsonConfig::default().error_handler(|err, req| {
		warn!("Rejected malformed body on {}: {err}", req.path());
		ApiError::BadClientDataError.into()
	})
}
