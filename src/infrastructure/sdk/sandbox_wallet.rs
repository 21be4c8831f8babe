use async_trait::async_trait;
use log::info;
use tokio::sync::{Mutex, mpsc};
use uuid::Uuid;

use crate::client::errors::SdkError;
use crate::client::wallet_sdk::{
	PaymentDescriptor, Scope, SdkAuth, SdkConfig, SdkEvent, WalletSdk,
};
use crate::domain::user::User;

/// What the simulated wallet user does with each payment.
#[derive(Debug, Clone, PartialEq)]
pub enum SandboxDecision {
	Approve,
	Cancel,
	Fail { error: String },
}

/// In-process stand-in for the wallet: it answers `create_payment` by firing
/// the callback the configured decision calls for.
pub struct SandboxWallet {
	config:    SdkConfig,
	decision:  SandboxDecision,
	events:    mpsc::UnboundedSender<SdkEvent>,
	completed: Mutex<Vec<(String, String)>>,
}

impl SandboxWallet {
	pub fn new(
		config: SdkConfig,
		decision: SandboxDecision,
	) -> (Self, mpsc::UnboundedReceiver<SdkEvent>) {
		let (events, receiver) = mpsc::unbounded_channel();
		info!(
			"Sandbox wallet v{} ready (sandbox={})",
			config.version, config.sandbox
		);
		(
			Self {
				config,
				decision,
				events,
				completed: Mutex::new(Vec::new()),
			},
			receiver,
		)
	}

	/// `(payment_id, txid)` pairs the wallet was asked to complete.
	pub async fn completed_payments(&self) -> Vec<(String, String)> {
		self.completed.lock().await.clone()
	}

	fn emit(&self, event: SdkEvent) -> Result<(), SdkError> {
		self.events.send(event).map_err(|_| SdkError::Unavailable {
			reason: "event listener is gone".to_string(),
		})
	}
}

#[async_trait]
impl WalletSdk for SandboxWallet {
	fn config(&self) -> &SdkConfig {
		&self.config
	}

	async fn authenticate(&self, scopes: &[Scope]) -> Result<SdkAuth, SdkError> {
		if !scopes.contains(&Scope::Payments) {
			return Err(SdkError::Rejected {
				reason: "payments scope is required".to_string(),
			});
		}
		Ok(SdkAuth {
			access_token: Uuid::new_v4().simple().to_string(),
			user:         User {
				uid:      Some(Uuid::new_v4().to_string()),
				username: "sandbox-pioneer".to_string(),
				session:  None,
			},
		})
	}

	async fn create_payment(
		&self,
		descriptor: PaymentDescriptor,
	) -> Result<(), SdkError> {
		let payment_id = descriptor.identifier;
		let event = match &self.decision {
			SandboxDecision::Approve => SdkEvent::ReadyForServerApproval { payment_id },
			SandboxDecision::Cancel => SdkEvent::Cancelled { payment_id },
			SandboxDecision::Fail { error } => SdkEvent::Failed {
				error:      error.clone(),
				payment_id: Some(payment_id),
			},
		};
		self.emit(event)
	}

	async fn complete_payment(
		&self,
		payment_id: &str,
		txid: &str,
	) -> Result<(), SdkError> {
		self.completed
			.lock()
			.await
			.push((payment_id.to_string(), txid.to_string()));
		Ok(())
	}
}
