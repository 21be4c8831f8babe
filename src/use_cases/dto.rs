use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CreatePaymentCommand {
	pub amount:   f64,
	pub memo:     String,
	pub metadata: serde_json::Value,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApprovePaymentCommand {
	pub payment_id: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApprovalResult {
	pub payment_id: String,
	pub txid:       String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CompletePaymentCommand {
	pub payment_id: String,
	pub txid:       String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RecordCallbackCommand {
	pub payment_id: String,
	pub txid:       Option<String>,
	pub status:     String,
	pub extra:      serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CallbackReceipt {
	pub duplicate: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub enum AuthenticateCommand {
	AccessToken(String),
	Identity { uid: String, username: String },
}

#[derive(Debug, Clone)]
pub struct HealthReport {
	pub uptime_secs: f64,
	pub rss_bytes:   Option<u64>,
}
