use async_trait::async_trait;

use crate::adapters::web::schema::{
	ApprovePaymentResponse, AuthRequest, AuthResponse, CallbackRequest,
	CallbackResponse, CompletePaymentResponse, CreatePaymentRequest,
	CreatePaymentResponse, HealthResponse,
};
use crate::client::errors::RelayClientError;

/// The relay endpoints the handshake driver talks to.
#[async_trait]
pub trait RelayApi: Send + Sync + 'static {
	async fn authenticate(
		&self,
		request: &AuthRequest,
	) -> Result<AuthResponse, RelayClientError>;
	async fn create_payment(
		&self,
		request: &CreatePaymentRequest,
	) -> Result<CreatePaymentResponse, RelayClientError>;
	async fn approve_payment(
		&self,
		payment_id: &str,
	) -> Result<ApprovePaymentResponse, RelayClientError>;
	async fn complete_payment(
		&self,
		payment_id: &str,
		txid: &str,
	) -> Result<CompletePaymentResponse, RelayClientError>;
	async fn notify_callback(
		&self,
		request: &CallbackRequest,
	) -> Result<CallbackResponse, RelayClientError>;
	async fn health(&self) -> Result<HealthResponse, RelayClientError>;
}
