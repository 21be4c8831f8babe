use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::errors::SdkError;
use crate::domain::user::User;

/// Where the browser build loads the wallet SDK from.
pub const SDK_URL: &str = "https://sdk.minepi.com/pi-sdk.js";

#[derive(Debug, Clone, PartialEq)]
pub struct SdkConfig {
	pub version: String,
	pub sandbox: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
	Username,
	Payments,
	WalletAddress,
}

#[derive(Debug, Clone)]
pub struct SdkAuth {
	pub access_token: String,
	pub user:         User,
}

/// What the wallet is asked to pay. `identifier` is the relay's id.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentDescriptor {
	pub identifier: String,
	pub amount:     f64,
	pub memo:       String,
	pub metadata:   serde_json::Value,
}

/// Lifecycle callbacks the wallet fires after `create_payment`.
#[derive(Debug, Clone, PartialEq)]
pub enum SdkEvent {
	ReadyForServerApproval { payment_id: String },
	ReadyForServerCompletion { payment_id: String, txid: String },
	Cancelled { payment_id: String },
	Failed {
		error:      String,
		payment_id: Option<String>,
	},
}

/// The third-party wallet. Its retries and timeouts are its own business.
#[async_trait]
pub trait WalletSdk: Send + Sync + 'static {
	fn config(&self) -> &SdkConfig;
	async fn authenticate(&self, scopes: &[Scope]) -> Result<SdkAuth, SdkError>;
	async fn create_payment(
		&self,
		descriptor: PaymentDescriptor,
	) -> Result<(), SdkError>;
	async fn complete_payment(
		&self,
		payment_id: &str,
		txid: &str,
	) -> Result<(), SdkError>;
}
