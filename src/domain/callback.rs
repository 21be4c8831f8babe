use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CallbackNotice {
	pub payment_id:  String,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub txid:        Option<String>,
	pub status:      String,
	#[serde(skip_serializing_if = "serde_json::Map::is_empty", default)]
	pub extra:       serde_json::Map<String, serde_json::Value>,
	#[serde(with = "time::serde::rfc3339")]
	pub received_at: OffsetDateTime,
}

/// What the ledger did with a callback notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackOutcome {
	Recorded,
	Duplicate,
	/// The notice names a payment the ledger never created; it is not kept.
	UnknownPayment,
}

impl CallbackNotice {
	/// Two notices with the same key describe the same delivery.
	pub fn dedup_key(&self) -> (String, String, Option<String>) {
		(
			self.payment_id.clone(),
			self.status.trim().to_ascii_lowercase(),
			self.txid.clone(),
		)
	}
}
