use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::adapters::web::schema::{
	ApprovePaymentRequest, ApprovePaymentResponse, AuthRequest, AuthResponse,
	CallbackRequest, CallbackResponse, CompletePaymentRequest,
	CompletePaymentResponse, CreatePaymentRequest, CreatePaymentResponse,
	HealthResponse,
};
use crate::client::errors::RelayClientError;
use crate::client::relay_api::RelayApi;

#[derive(Clone)]
pub struct HttpRelayClient {
	base_url:    String,
	http_client: Client,
}

impl HttpRelayClient {
	pub fn new(
		base_url: impl Into<String>,
		timeout: Duration,
	) -> Result<Self, RelayClientError> {
		let http_client = Client::builder().timeout(timeout).build()?;
		Ok(Self::with_client(base_url, http_client))
	}

	pub fn with_client(base_url: impl Into<String>, http_client: Client) -> Self {
		Self {
			base_url: base_url.into().trim_end_matches('/').to_string(),
			http_client,
		}
	}

	fn url(&self, path: &str) -> String {
		format!("{}{path}", self.base_url)
	}

	async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, RelayClientError>
	where
		B: Serialize + Sync + ?Sized,
		T: DeserializeOwned,
	{
		debug!("POST {path}");
		let resp = self.http_client.post(self.url(path)).json(body).send().await?;
		Self::read(resp).await
	}

	async fn get_json<T: DeserializeOwned>(
		&self,
		path: &str,
	) -> Result<T, RelayClientError> {
		debug!("GET {path}");
		let resp = self.http_client.get(self.url(path)).send().await?;
		Self::read(resp).await
	}

	async fn read<T: DeserializeOwned>(resp: Response) -> Result<T, RelayClientError> {
		let status = resp.status();
		if !status.is_success() {
			let body = resp.text().await.unwrap_or_default();
			return Err(RelayClientError::Status {
				status: status.as_u16(),
				body,
			});
		}
		resp.json::<T>()
			.await
			.map_err(|e| RelayClientError::Decode {
				message: e.to_string(),
			})
	}
}

#[async_trait]
impl RelayApi for HttpRelayClient {
	async fn authenticate(
		&self,
		request: &AuthRequest,
	) -> Result<AuthResponse, RelayClientError> {
		self.post_json("/api/auth", request).await
	}

	async fn create_payment(
		&self,
		request: &CreatePaymentRequest,
	) -> Result<CreatePaymentResponse, RelayClientError> {
		self.post_json("/api/payments/create", request).await
	}

	async fn approve_payment(
		&self,
		payment_id: &str,
	) -> Result<ApprovePaymentResponse, RelayClientError> {
		let request = ApprovePaymentRequest {
			payment_id: payment_id.to_string(),
		};
		self.post_json("/api/payments/approve", &request).await
	}

	async fn complete_payment(
		&self,
		payment_id: &str,
		txid: &str,
	) -> Result<CompletePaymentResponse, RelayClientError> {
		let request = CompletePaymentRequest {
			payment_id: payment_id.to_string(),
			txid:       txid.to_string(),
		};
		self.post_json("/api/payments/complete", &request).await
	}

	async fn notify_callback(
		&self,
		request: &CallbackRequest,
	) -> Result<CallbackResponse, RelayClientError> {
		self.post_json("/api/payments/callback", request).await
	}

	async fn health(&self) -> Result<HealthResponse, RelayClientError> {
		self.get_json("/health").await
	}
}
