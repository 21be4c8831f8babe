use derive_more::derive::{Display, Error};

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum RelayClientError {
	#[display("Relay unreachable: {message}")]
	Network { message: String },
	#[display("Relay answered {status}: {body}")]
	Status { status: u16, body: String },
	#[display("Unexpected relay response: {message}")]
	Decode { message: String },
}

impl RelayClientError {
	pub fn is_network(&self) -> bool {
		matches!(self, RelayClientError::Network { .. })
	}
}

impl From<reqwest::Error> for RelayClientError {
	fn from(e: reqwest::Error) -> Self {
		if e.is_decode() {
			RelayClientError::Decode {
				message: e.to_string(),
			}
		} else {
			RelayClientError::Network {
				message: e.to_string(),
			}
		}
	}
}

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum SdkError {
	#[display("Wallet SDK is unavailable: {reason}")]
	Unavailable { reason: String },
	#[display("Wallet SDK rejected the request: {reason}")]
	Rejected { reason: String },
}

#[derive(Debug, Display, Error)]
pub enum HandshakeError {
	#[display("Relay call failed: {source}")]
	Relay { source: RelayClientError },
	#[display("Wallet SDK call failed: {source}")]
	Sdk { source: SdkError },
	#[display("No handshake for payment {payment_id}.")]
	UnknownPayment { payment_id: String },
	#[display("Handshake {payment_id} cannot take {event} while {from}.")]
	InvalidTransition {
		payment_id: String,
		from:       &'static str,
		event:      &'static str,
	},
	#[display("Already {limit} payment(s) in flight.")]
	PaymentInFlight { limit: usize },
	#[display("Wallet SDK is not loaded.")]
	SdkNotLoaded,
}

impl From<RelayClientError> for HandshakeError {
	fn from(source: RelayClientError) -> Self {
		HandshakeError::Relay { source }
	}
}

impl From<SdkError> for HandshakeError {
	fn from(source: SdkError) -> Self {
		HandshakeError::Sdk { source }
	}
}
