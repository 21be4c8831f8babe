use derive_more::derive::{Display, Error};

use crate::domain::payment::PaymentStatus;

#[derive(Debug, Display, Error)]
pub enum RelayError {
	#[display("Payment {identifier} was not found.")]
	PaymentNotFound { identifier: String },
	#[display("Payment {identifier} cannot move from {from} to {to}.")]
	InvalidTransition {
		identifier: String,
		from:       PaymentStatus,
		to:         PaymentStatus,
	},
	#[display("Payment {identifier} was approved with a different txid.")]
	TxidMismatch { identifier: String },
	#[display("Unknown payment status: {status}.")]
	UnknownStatus { status: String },
	#[display("Storage failure: {message}")]
	Storage { message: String },
}

impl From<Box<dyn std::error::Error + Send>> for RelayError {
	fn from(err: Box<dyn std::error::Error + Send>) -> Self {
		RelayError::Storage {
			message: err.to_string(),
		}
	}
}
