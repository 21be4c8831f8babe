use actix_web::http::StatusCode;
use actix_web::{App, test};
use serde_json::json;
use wallet_relay::adapters::web::errors::ErrorResponse;
use wallet_relay::adapters::web::routes::RelayServices;
use wallet_relay::adapters::web::schema::{
	ApprovePaymentResponse, AuthResponse, CallbackResponse,
	CompletePaymentResponse, CreatePaymentResponse, HealthResponse,
	PaymentDetailsResponse,
};
use wallet_relay::domain::payment::PaymentStatus;
use wallet_relay::domain::policy::TransitionPolicy;
use wallet_relay::infrastructure::persistence::in_memory_payment_repository::InMemoryPaymentRepository;

mod support;

use crate::support::{VALIDATION_KEY, relay_services};

fn post(uri: &str, body: serde_json::Value) -> test::TestRequest {
	test::TestRequest::post().uri(uri).set_json(body)
}

fn create_request() -> test::TestRequest {
	post(
		"/api/payments/create",
		json!({ "amount": 3.14, "memo": "Test", "metadata": { "userId": "nathan" } }),
	)
}

fn details_request(payment_id: &str) -> test::TestRequest {
	test::TestRequest::get().uri(&format!("/api/payments/{payment_id}"))
}

#[actix_web::test]
async fn test_create_payment_returns_pending_intent() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

	let resp = test::call_service(&app, create_request().to_request()).await;
	assert_eq!(resp.status(), StatusCode::OK);
	let first: CreatePaymentResponse = test::read_body_json(resp).await;
	let second: CreatePaymentResponse =
		test::call_and_read_body_json(&app, create_request().to_request()).await;

	assert!(first.success);
	assert_eq!(first.status, PaymentStatus::Pending);
	assert_eq!(first.payment.amount, 3.14);
	assert_eq!(first.payment.memo, "Test");
	assert_eq!(first.payment.metadata["userId"], "nathan");
	assert_ne!(first.payment.identifier, second.payment.identifier);
}

#[actix_web::test]
async fn test_create_payment_defaults_memo_and_metadata() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

	let req = post("/api/payments/create", json!({ "amount": 1 })).to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), StatusCode::OK);

	let body: CreatePaymentResponse = test::read_body_json(resp).await;
	assert_eq!(body.payment.memo, "");
	assert!(body.payment.metadata.is_null());
}

#[actix_web::test]
async fn test_malformed_body_is_rejected() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

	let req = test::TestRequest::post()
		.uri("/api/payments/create")
		.insert_header(("content-type", "application/json"))
		.set_payload("{ not json")
		.to_request();
	let resp = test::call_service(&app, req).await;

	assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	let body: ErrorResponse = test::read_body_json(resp).await;
	assert_eq!(body.status_code, 400);
	assert_eq!(body.error, "Request data is invalid.");
	assert_eq!(body.message, "Bad request");
}

#[actix_web::test]
async fn test_loose_create_bodies_are_accepted() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

	let resp =
		test::call_service(&app, post("/api/payments/create", json!({})).to_request())
			.await;
	assert_eq!(resp.status(), StatusCode::OK);
	let empty: CreatePaymentResponse = test::read_body_json(resp).await;
	assert_eq!(empty.status, PaymentStatus::Pending);
	assert_eq!(empty.payment.amount, 0.0);

	let req = post(
		"/api/payments/create",
		json!({ "amount": "2.5", "memo": null }),
	)
	.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), StatusCode::OK);
	let stringly: CreatePaymentResponse = test::read_body_json(resp).await;
	assert_eq!(stringly.payment.amount, 2.5);
	assert_eq!(stringly.payment.memo, "");
}

#[actix_web::test]
async fn test_loose_handshake_bodies_are_accepted() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;
	let created: CreatePaymentResponse =
		test::call_and_read_body_json(&app, create_request().to_request()).await;
	let id = created.payment.identifier;

	let resp =
		test::call_service(&app, post("/api/payments/approve", json!({})).to_request())
			.await;
	assert_eq!(resp.status(), StatusCode::OK);
	let approval: ApprovePaymentResponse = test::read_body_json(resp).await;
	assert!(!approval.txid.is_empty());

	let req = post("/api/payments/complete", json!({ "paymentId": id })).to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), StatusCode::OK);
	let completion: CompletePaymentResponse = test::read_body_json(resp).await;
	assert_eq!(completion.payment_id, id);
	assert_eq!(completion.txid, "");

	let req = post(
		"/api/payments/callback",
		json!({ "paymentId": id, "txid": "abc" }),
	)
	.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), StatusCode::OK);
	let receipt: CallbackResponse = test::read_body_json(resp).await;
	assert!(receipt.received);

	let details: PaymentDetailsResponse =
		test::call_and_read_body_json(&app, details_request(&id).to_request()).await;
	assert_eq!(details.payment.status, PaymentStatus::Pending);
	assert_eq!(details.callbacks.len(), 1);
	assert_eq!(details.callbacks[0].status, "");
}

#[actix_web::test]
async fn test_lenient_approve_of_unknown_payment_still_answers() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

	let req = post("/api/payments/approve", json!({ "paymentId": "abc" })).to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), StatusCode::OK);

	let body: ApprovePaymentResponse = test::read_body_json(resp).await;
	assert!(body.success);
	assert_eq!(body.payment_id, "abc");
	assert_eq!(body.status, PaymentStatus::Approved);
	assert!(!body.txid.is_empty());
}

#[actix_web::test]
async fn test_lenient_double_approve_mints_new_txid() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;
	let created: CreatePaymentResponse =
		test::call_and_read_body_json(&app, create_request().to_request()).await;
	let id = created.payment.identifier;

	let first: ApprovePaymentResponse = test::call_and_read_body_json(
		&app,
		post("/api/payments/approve", json!({ "paymentId": id })).to_request(),
	)
	.await;
	let second: ApprovePaymentResponse = test::call_and_read_body_json(
		&app,
		post("/api/payments/approve", json!({ "paymentId": id })).to_request(),
	)
	.await;
	assert_ne!(first.txid, second.txid);

	// The ledger keeps the txid of the approval that actually moved it.
	let details: PaymentDetailsResponse =
		test::call_and_read_body_json(&app, details_request(&id).to_request()).await;
	assert_eq!(details.payment.txid, Some(first.txid));
}

#[actix_web::test]
async fn test_full_payment_flow_is_recorded() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;
	let created: CreatePaymentResponse =
		test::call_and_read_body_json(&app, create_request().to_request()).await;
	let id = created.payment.identifier;

	let approval: ApprovePaymentResponse = test::call_and_read_body_json(
		&app,
		post("/api/payments/approve", json!({ "paymentId": id })).to_request(),
	)
	.await;

	let req = post(
		"/api/payments/complete",
		json!({ "paymentId": id, "txid": approval.txid }),
	)
	.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), StatusCode::OK);
	let completion: CompletePaymentResponse = test::read_body_json(resp).await;
	assert_eq!(completion.status, PaymentStatus::Completed);
	assert_eq!(completion.txid, approval.txid);

	let receipt: CallbackResponse = test::call_and_read_body_json(
		&app,
		post(
			"/api/payments/callback",
			json!({ "paymentId": id, "txid": approval.txid, "status": "completed" }),
		)
		.to_request(),
	)
	.await;
	assert!(receipt.received);
	assert!(!receipt.duplicate);

	let details: PaymentDetailsResponse =
		test::call_and_read_body_json(&app, details_request(&id).to_request()).await;
	assert_eq!(details.payment.status, PaymentStatus::Completed);
	assert_eq!(details.payment.txid.as_deref(), Some(approval.txid.as_str()));
	assert_eq!(details.callbacks.len(), 1);
}

#[actix_web::test]
async fn test_repeated_callback_is_flagged_duplicate() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;
	let created: CreatePaymentResponse =
		test::call_and_read_body_json(&app, create_request().to_request()).await;
	let id = created.payment.identifier;
	let body =
		json!({ "paymentId": id, "status": "cancelled", "reason": "user_cancelled" });

	let first: CallbackResponse = test::call_and_read_body_json(
		&app,
		post("/api/payments/callback", body.clone()).to_request(),
	)
	.await;
	let second: CallbackResponse = test::call_and_read_body_json(
		&app,
		post("/api/payments/callback", body).to_request(),
	)
	.await;

	assert!(first.success && first.received && !first.duplicate);
	assert!(second.success && second.received && second.duplicate);

	let details: PaymentDetailsResponse =
		test::call_and_read_body_json(&app, details_request(&id).to_request()).await;
	assert_eq!(details.callbacks.len(), 1);
}

#[actix_web::test]
async fn test_callback_for_unknown_payment_is_acknowledged() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;
	let body = json!({ "paymentId": "ghost", "status": "cancelled" });

	for _ in 0..2 {
		let receipt: CallbackResponse = test::call_and_read_body_json(
			&app,
			post("/api/payments/callback", body.clone()).to_request(),
		)
		.await;
		assert!(receipt.success && receipt.received && !receipt.duplicate);
	}

	let resp = test::call_service(&app, details_request("ghost").to_request()).await;
	assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_cancel_callback_moves_pending_payment() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;
	let created: CreatePaymentResponse =
		test::call_and_read_body_json(&app, create_request().to_request()).await;
	let id = created.payment.identifier;

	let req = post(
		"/api/payments/callback",
		json!({ "paymentId": id, "status": "Cancelled", "reason": "user_cancelled" }),
	)
	.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), StatusCode::OK);

	let details: PaymentDetailsResponse =
		test::call_and_read_body_json(&app, details_request(&id).to_request()).await;
	assert_eq!(details.payment.status, PaymentStatus::Cancelled);
	assert_eq!(details.callbacks[0].extra["reason"], "user_cancelled");
}

#[actix_web::test]
async fn test_strict_policy_rejects_unknown_payment() {
	let services = relay_services(TransitionPolicy::Strict);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

	let req = post("/api/payments/approve", json!({ "paymentId": "nope" })).to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), StatusCode::NOT_FOUND);
	let body: ErrorResponse = test::read_body_json(resp).await;
	assert_eq!(body.error, "Payment not found.");
	assert_eq!(body.message, "Not Found");

	let req = post(
		"/api/payments/complete",
		json!({ "paymentId": "nope", "txid": "t" }),
	)
	.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_strict_policy_rejects_out_of_order_steps() {
	let services = relay_services(TransitionPolicy::Strict);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;
	let created: CreatePaymentResponse =
		test::call_and_read_body_json(&app, create_request().to_request()).await;
	let id = created.payment.identifier;

	let req = post(
		"/api/payments/complete",
		json!({ "paymentId": id, "txid": "early" }),
	)
	.to_request();
	assert_eq!(
		test::call_service(&app, req).await.status(),
		StatusCode::CONFLICT
	);

	let req = post("/api/payments/approve", json!({ "paymentId": id })).to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), StatusCode::OK);
	let approval: ApprovePaymentResponse = test::read_body_json(resp).await;

	let req = post("/api/payments/approve", json!({ "paymentId": id })).to_request();
	assert_eq!(
		test::call_service(&app, req).await.status(),
		StatusCode::CONFLICT
	);

	let req = post(
		"/api/payments/complete",
		json!({ "paymentId": id, "txid": "someone-else" }),
	)
	.to_request();
	assert_eq!(
		test::call_service(&app, req).await.status(),
		StatusCode::CONFLICT
	);

	let req = post(
		"/api/payments/complete",
		json!({ "paymentId": id, "txid": approval.txid }),
	)
	.to_request();
	assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_payment_details_unknown_payment() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

	let resp = test::call_service(&app, details_request("missing").to_request()).await;
	assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_health_reports_uptime() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

	let req = test::TestRequest::get().uri("/health").to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), StatusCode::OK);

	let body: HealthResponse = test::read_body_json(resp).await;
	assert_eq!(body.status, "healthy");
	assert!(body.uptime >= 0.0);
}

#[actix_web::test]
async fn test_index_answers() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

	let req = test::TestRequest::get().uri("/").to_request();
	let body = test::call_and_read_body(&app, req).await;
	assert_eq!(body, "Wallet relay online");
}

#[actix_web::test]
async fn test_auth_accepts_access_token() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

	let req = post("/api/auth", json!({ "accessToken": "token" })).to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), StatusCode::OK);

	let body: AuthResponse = test::read_body_json(resp).await;
	assert!(body.success);
	assert_eq!(body.user.username, "TestUser");
	assert!(body.user.session.is_some());
}

#[actix_web::test]
async fn test_auth_accepts_identity() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

	let req = post("/api/auth", json!({ "uid": "u-42", "username": "alice" })).to_request();
	let body: AuthResponse = test::call_and_read_body_json(&app, req).await;
	assert_eq!(body.user.uid.as_deref(), Some("u-42"));
	assert_eq!(body.user.username, "alice");
}

#[actix_web::test]
async fn test_auth_without_token_signs_in_unverified_user() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

	let resp = test::call_service(&app, post("/api/auth", json!({})).to_request()).await;
	assert_eq!(resp.status(), StatusCode::OK);
	let body: AuthResponse = test::read_body_json(resp).await;
	assert_eq!(body.user.username, "TestUser");
	assert!(body.user.uid.is_none());
}

#[actix_web::test]
async fn test_validation_key_is_served_as_text() {
	let services = relay_services(TransitionPolicy::Lenient);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

	let req = test::TestRequest::get()
		.uri("/validation-key.txt")
		.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), StatusCode::OK);
	assert!(
		resp.headers()
			.get("content-type")
			.and_then(|v| v.to_str().ok())
			.is_some_and(|v| v.starts_with("text/plain"))
	);

	let body = test::read_body(resp).await;
	assert_eq!(body, VALIDATION_KEY);
	assert_eq!(body.len(), 128);
}

#[actix_web::test]
async fn test_validation_key_missing() {
	let services = RelayServices::new(
		InMemoryPaymentRepository::new(),
		TransitionPolicy::Lenient,
		None,
		std::time::Instant::now(),
	);
	let app =
		test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

	let req = test::TestRequest::get()
		.uri("/validation-key.txt")
		.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
