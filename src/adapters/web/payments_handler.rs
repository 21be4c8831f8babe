use actix_web::{HttpResponse, Responder, ResponseError, get, post, web};
use log::warn;

use crate::adapters::web::Repository;
use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::{
	ApprovePaymentRequest, ApprovePaymentResponse, CallbackRequest,
	CallbackResponse, CompletePaymentRequest, CompletePaymentResponse,
	CreatePaymentRequest, CreatePaymentResponse, PaymentDetailsResponse,
};
use crate::domain::payment::PaymentStatus;
use crate::use_cases::approve_payment::ApprovePaymentUseCase;
use crate::use_cases::complete_payment::CompletePaymentUseCase;
use crate::use_cases::create_payment::CreatePaymentUseCase;
use crate::use_cases::dto::{
	ApprovePaymentCommand, CompletePaymentCommand, CreatePaymentCommand,
	RecordCallbackCommand,
};
use crate::use_cases::get_payment::GetPaymentUseCase;
use crate::use_cases::record_callback::RecordCallbackUseCase;

#[post("/api/payments/create")]
pub async fn create_payment(
	payload: web::Json<CreatePaymentRequest>,
	create_payment_use_case: web::Data<CreatePaymentUseCase<Repository>>,
) -> impl Responder {
	let request = payload.into_inner();
	let command = CreatePaymentCommand {
		amount:   request.amount,
		memo:     request.memo,
		metadata: request.metadata,
	};

	match create_payment_use_case.execute(command).await {
		Ok(payment) => HttpResponse::Ok().json(CreatePaymentResponse {
			success: true,
			status:  payment.status,
			payment: payment.into(),
		}),
		Err(e) => {
			warn!("Error creating payment: {e}");
			ApiError::from(e).error_response()
		}
	}
}

#[post("/api/payments/approve")]
pub async fn approve_payment(
	payload: web::Json<ApprovePaymentRequest>,
	approve_payment_use_case: web::Data<ApprovePaymentUseCase<Repository>>,
) -> impl Responder {
	let command = ApprovePaymentCommand {
		payment_id: payload.into_inner().payment_id,
	};

	match approve_payment_use_case.execute(command).await {
		Ok(approval) => HttpResponse::Ok().json(ApprovePaymentResponse {
			success:    true,
			payment_id: approval.payment_id,
			txid:       approval.txid,
			status:     PaymentStatus::Approved,
		}),
		Err(e) => {
			warn!("Error approving payment: {e}");
			ApiError::from(e).error_response()
		}
	}
}

#[post("/api/payments/complete")]
pub async fn complete_payment(
	payload: web::Json<CompletePaymentRequest>,
	complete_payment_use_case: web::Data<CompletePaymentUseCase<Repository>>,
) -> impl Responder {
	let request = payload.into_inner();
	let command = CompletePaymentCommand {
		payment_id: request.payment_id,
		txid:       request.txid,
	};

	match complete_payment_use_case.execute(command).await {
		Ok(completed) => HttpResponse::Ok().json(CompletePaymentResponse {
			success:    true,
			payment_id: completed.payment_id,
			txid:       completed.txid,
			status:     PaymentStatus::Completed,
		}),
		Err(e) => {
			warn!("Error completing payment: {e}");
			ApiError::from(e).error_response()
		}
	}
}

#[post("/api/payments/callback")]
pub async fn payment_callback(
	payload: web::Json<CallbackRequest>,
	record_callback_use_case: web::Data<RecordCallbackUseCase<Repository>>,
) -> impl Responder {
	let request = payload.into_inner();
	let command = RecordCallbackCommand {
		payment_id: request.payment_id,
		txid:       request.txid,
		status:     request.status,
		extra:      request.extra,
	};

	match record_callback_use_case.execute(command).await {
		Ok(receipt) => HttpResponse::Ok().json(CallbackResponse {
			success:   true,
			received:  true,
			duplicate: receipt.duplicate,
		}),
		Err(e) => {
			warn!("Error recording callback: {e}");
			ApiError::from(e).error_response()
		}
	}
}

#[get("/api/payments/{payment_id}")]
pub async fn payment_details(
	path: web::Path<String>,
	get_payment_use_case: web::Data<GetPaymentUseCase<Repository>>,
) -> impl Responder {
	match get_payment_use_case.execute(&path.into_inner()).await {
		Ok((payment, callbacks)) => HttpResponse::Ok().json(PaymentDetailsResponse {
			success: true,
			payment,
			callbacks,
		}),
		Err(e) => ApiError::from(e).error_response(),
	}
}
