use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::domain::callback::CallbackNotice;
use crate::domain::payment::{PaymentIntent, PaymentStatus};
use crate::domain::user::User;

/// Any JSON body is an auth request: without a `uid`/`username` pair it is
/// treated as an access token, possibly empty.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(untagged, from = "Value")]
pub enum AuthRequest {
	AccessToken {
		#[serde(rename = "accessToken")]
		access_token: String,
	},
	Identity {
		uid:      String,
		username: String,
	},
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthResponse {
	pub success: bool,
	pub user:    User,
}

/// `amount` accepts numbers and numeric strings; anything else reads as 0.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(from = "Value")]
pub struct CreatePaymentRequest {
	pub amount:   f64,
	pub memo:     String,
	pub metadata: Value,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentView {
	pub identifier: String,
	pub amount:     f64,
	pub memo:       String,
	pub metadata:   serde_json::Value,
	pub status:     PaymentStatus,
}

impl From<PaymentIntent> for PaymentView {
	fn from(payment: PaymentIntent) -> Self {
		Self {
			identifier: payment.identifier,
			amount:     payment.amount,
			memo:       payment.memo,
			metadata:   payment.metadata,
			status:     payment.status,
		}
	}
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CreatePaymentResponse {
	pub success: bool,
	pub status:  PaymentStatus,
	pub payment: PaymentView,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(from = "Value")]
pub struct ApprovePaymentRequest {
	#[serde(rename = "paymentId")]
	pub payment_id: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApprovePaymentResponse {
	pub success:    bool,
	#[serde(rename = "paymentId")]
	pub payment_id: String,
	pub txid:       String,
	pub status:     PaymentStatus,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(from = "Value")]
pub struct CompletePaymentRequest {
	#[serde(rename = "paymentId")]
	pub payment_id: String,
	pub txid:       String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CompletePaymentResponse {
	pub success:    bool,
	#[serde(rename = "paymentId")]
	pub payment_id: String,
	pub txid:       String,
	pub status:     PaymentStatus,
}

/// Fields other than `paymentId`, `txid` and `status` are kept in `extra`.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(from = "Value")]
pub struct CallbackRequest {
	#[serde(rename = "paymentId")]
	pub payment_id: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub txid:       Option<String>,
	pub status:     String,
	#[serde(flatten)]
	pub extra:      serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CallbackResponse {
	pub success:   bool,
	pub received:  bool,
	#[serde(default)]
	pub duplicate: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentDetailsResponse {
	pub success:   bool,
	pub payment:   PaymentIntent,
	pub callbacks: Vec<CallbackNotice>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MemoryUsage {
	#[serde(rename = "rssBytes")]
	pub rss_bytes: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HealthResponse {
	pub status:    String,
	#[serde(with = "time::serde::rfc3339")]
	pub timestamp: OffsetDateTime,
	/// Seconds since the relay started.
	pub uptime:    f64,
	pub memory:    MemoryUsage,
}

fn text(value: Option<&Value>) -> Option<String> {
	match value? {
		Value::Null => None,
		Value::String(s) => Some(s.clone()),
		other => Some(other.to_string()),
	}
}

fn number(value: Option<&Value>) -> Option<f64> {
	match value? {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse().ok().filter(|n: &f64| n.is_finite()),
		_ => None,
	}
}

impl From<Value> for AuthRequest {
	fn from(body: Value) -> Self {
		match (text(body.get("uid")), text(body.get("username"))) {
			(Some(uid), Some(username)) => AuthRequest::Identity { uid, username },
			_ => AuthRequest::AccessToken {
				access_token: text(body.get("accessToken")).unwrap_or_default(),
			},
		}
	}
}

impl From<Value> for CreatePaymentRequest {
	fn from(body: Value) -> Self {
		Self {
			amount:   number(body.get("amount")).unwrap_or_default(),
			memo:     text(body.get("memo")).unwrap_or_default(),
			metadata: body.get("metadata").cloned().unwrap_or(Value::Null),
		}
	}
}

impl From<Value> for ApprovePaymentRequest {
	fn from(body: Value) -> Self {
		Self {
			payment_id: text(body.get("paymentId")).unwrap_or_default(),
		}
	}
}

impl From<Value> for CompletePaymentRequest {
	fn from(body: Value) -> Self {
		Self {
			payment_id: text(body.get("paymentId")).unwrap_or_default(),
			txid:       text(body.get("txid")).unwrap_or_default(),
		}
	}
}

impl From<Value> for CallbackRequest {
	fn from(body: Value) -> Self {
		let Value::Object(mut fields) = body else {
			return Self {
				payment_id: String::new(),
				txid:       None,
				status:     String::new(),
				extra:      serde_json::Map::new(),
			};
		};
		Self {
			payment_id: text(fields.remove("paymentId").as_ref()).unwrap_or_default(),
			txid:       text(fields.remove("txid").as_ref()),
			status:     text(fields.remove("status").as_ref()).unwrap_or_default(),
			extra:      fields,
		}
	}
}
