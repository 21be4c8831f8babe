use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;
use wallet_relay::adapters::web::schema::{
	ApprovePaymentResponse, AuthRequest, AuthResponse, CallbackRequest,
	CallbackResponse, CompletePaymentResponse, CreatePaymentRequest,
	CreatePaymentResponse, HealthResponse, MemoryUsage, PaymentView,
};
use wallet_relay::client::errors::RelayClientError;
use wallet_relay::client::relay_api::RelayApi;
use wallet_relay::domain::payment::PaymentStatus;
use wallet_relay::domain::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
	Auth,
	Create,
	Approve,
	Complete,
	Callback,
	Health,
}

#[derive(Default)]
struct FakeRelayState {
	failing:   HashSet<Endpoint>,
	calls:     Vec<Endpoint>,
	callbacks: Vec<CallbackRequest>,
}

/// Relay double that answers like the real one and can be told to drop
/// individual endpoints off the network.
#[derive(Clone, Default)]
pub struct FakeRelay {
	state: Arc<Mutex<FakeRelayState>>,
}

impl FakeRelay {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn fail(&self, endpoint: Endpoint) {
		self.state.lock().unwrap().failing.insert(endpoint);
	}

	pub fn recover(&self, endpoint: Endpoint) {
		self.state.lock().unwrap().failing.remove(&endpoint);
	}

	pub fn calls(&self) -> Vec<Endpoint> {
		self.state.lock().unwrap().calls.clone()
	}

	pub fn callbacks(&self) -> Vec<CallbackRequest> {
		self.state.lock().unwrap().callbacks.clone()
	}

	fn call(&self, endpoint: Endpoint) -> Result<(), RelayClientError> {
		let mut state = self.state.lock().unwrap();
		state.calls.push(endpoint);
		if state.failing.contains(&endpoint) {
			return Err(RelayClientError::Network {
				message: "connection refused".to_string(),
			});
		}
		Ok(())
	}
}

#[async_trait]
impl RelayApi for FakeRelay {
	async fn authenticate(
		&self,
		_request: &AuthRequest,
	) -> Result<AuthResponse, RelayClientError> {
		self.call(Endpoint::Auth)?;
		Ok(AuthResponse {
			success: true,
			user:    User {
				uid:      None,
				username: "TestUser".to_string(),
				session:  Some(Uuid::new_v4()),
			},
		})
	}

	async fn create_payment(
		&self,
		request: &CreatePaymentRequest,
	) -> Result<CreatePaymentResponse, RelayClientError> {
		self.call(Endpoint::Create)?;
		Ok(CreatePaymentResponse {
			success: true,
			status:  PaymentStatus::Pending,
			payment: PaymentView {
				identifier: Uuid::new_v4().to_string(),
				amount:     request.amount,
				memo:       request.memo.clone(),
				metadata:   request.metadata.clone(),
				status:     PaymentStatus::Pending,
			},
		})
	}

	async fn approve_payment(
		&self,
		payment_id: &str,
	) -> Result<ApprovePaymentResponse, RelayClientError> {
		self.call(Endpoint::Approve)?;
		Ok(ApprovePaymentResponse {
			success:    true,
			payment_id: payment_id.to_string(),
			txid:       Uuid::new_v4().simple().to_string(),
			status:     PaymentStatus::Approved,
		})
	}

	async fn complete_payment(
		&self,
		payment_id: &str,
		txid: &str,
	) -> Result<CompletePaymentResponse, RelayClientError> {
		self.call(Endpoint::Complete)?;
		Ok(CompletePaymentResponse {
			success:    true,
			payment_id: payment_id.to_string(),
			txid:       txid.to_string(),
			status:     PaymentStatus::Completed,
		})
	}

	async fn notify_callback(
		&self,
		request: &CallbackRequest,
	) -> Result<CallbackResponse, RelayClientError> {
		self.call(Endpoint::Callback)?;
		self.state.lock().unwrap().callbacks.push(request.clone());
		Ok(CallbackResponse {
			success:   true,
			received:  true,
			duplicate: false,
		})
	}

	async fn health(&self) -> Result<HealthResponse, RelayClientError> {
		self.call(Endpoint::Health)?;
		Ok(HealthResponse {
			status:    "healthy".to_string(),
			timestamp: OffsetDateTime::now_utc(),
			uptime:    1.0,
			memory:    MemoryUsage { rss_bytes: None },
		})
	}
}
