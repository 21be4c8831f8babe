use std::str::FromStr;

use derive_more::derive::Display;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::errors::RelayError;

#[derive(
	Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
	#[display("pending")]
	Pending,
	#[display("approved")]
	Approved,
	#[display("completed")]
	Completed,
	#[display("cancelled")]
	Cancelled,
	#[display("error")]
	Error,
}

impl PaymentStatus {
	pub fn is_terminal(&self) -> bool {
		matches!(
			self,
			PaymentStatus::Completed | PaymentStatus::Cancelled | PaymentStatus::Error
		)
	}

	/// Moving to the current status is allowed and treated as a no-op.
	pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
		if *self == next {
			return true;
		}

		matches!(
			(self, next),
			(
				PaymentStatus::Pending,
				PaymentStatus::Approved |
					PaymentStatus::Cancelled |
					PaymentStatus::Error
			) | (
				PaymentStatus::Approved,
				PaymentStatus::Completed |
					PaymentStatus::Cancelled |
					PaymentStatus::Error
			)
		)
	}
}

impl FromStr for PaymentStatus {
	type Err = RelayError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"pending" => Ok(PaymentStatus::Pending),
			"approved" => Ok(PaymentStatus::Approved),
			"completed" => Ok(PaymentStatus::Completed),
			"cancelled" | "canceled" => Ok(PaymentStatus::Cancelled),
			"error" => Ok(PaymentStatus::Error),
			other => Err(RelayError::UnknownStatus {
				status: other.to_string(),
			}),
		}
	}
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
	pub identifier: String,
	pub amount:     f64,
	pub memo:       String,
	pub metadata:   serde_json::Value,
	pub status:     PaymentStatus,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub txid:       Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}

impl PaymentIntent {
	pub fn new(amount: f64, memo: String, metadata: serde_json::Value) -> Self {
		let now = OffsetDateTime::now_utc();
		Self {
			identifier: Uuid::new_v4().to_string(),
			amount,
			memo,
			metadata,
			status: PaymentStatus::Pending,
			txid: None,
			created_at: now,
			updated_at: now,
		}
	}

	pub fn transition(&mut self, next: PaymentStatus) -> Result<(), RelayError> {
		if !self.status.can_transition_to(next) {
			return Err(RelayError::InvalidTransition {
				identifier: self.identifier.clone(),
				from:       self.status,
				to:         next,
			});
		}

		self.status = next;
		self.updated_at = OffsetDateTime::now_utc();
		Ok(())
	}
}

/// Opaque transaction id handed out on approval.
pub fn new_txid() -> String {
	Uuid::new_v4().simple().to_string()
}
