use std::sync::Arc;

use log::Level;
use tokio::sync::mpsc;

use crate::adapters::web::schema::{
	AuthRequest, CallbackRequest, CreatePaymentRequest, HealthResponse,
};
use crate::client::environment::HostEnvironment;
use crate::client::errors::HandshakeError;
use crate::client::handshake::{HandshakeEvent, HandshakeState};
use crate::client::relay_api::RelayApi;
use crate::client::session::ClientSession;
use crate::client::wallet_sdk::{
	PaymentDescriptor, SDK_URL, Scope, SdkEvent, WalletSdk,
};
use crate::domain::payment::PaymentStatus;
use crate::domain::user::User;

/// Bridges wallet SDK callbacks to relay calls.
///
/// Locks on the session are never held across a relay or SDK call. Nothing
/// is retried: a failed step leaves the handshake where it was and is
/// reported through the session status.
pub struct HandshakeDriver<R: RelayApi, W: WalletSdk> {
	relay:       R,
	wallet:      W,
	session:     Arc<ClientSession>,
	environment: HostEnvironment,
}

impl<R: RelayApi, W: WalletSdk> HandshakeDriver<R, W> {
	pub fn new(
		relay: R,
		wallet: W,
		session: Arc<ClientSession>,
		environment: HostEnvironment,
	) -> Self {
		Self {
			relay,
			wallet,
			session,
			environment,
		}
	}

	pub fn session(&self) -> &Arc<ClientSession> {
		&self.session
	}

	pub fn wallet(&self) -> &W {
		&self.wallet
	}

	/// Liveness check against the relay, reported on the console.
	pub async fn check_relay(&self) -> Result<HealthResponse, HandshakeError> {
		match self.relay.health().await {
			Ok(health) => {
				self.session
					.log(
						Level::Info,
						format!(
							"Relay {} (uptime {:.0}s) {}",
							health.status,
							health.uptime,
							self.environment.describe()
						),
					)
					.await;
				Ok(health)
			}
			Err(e) => {
				self.session.set_status(e.to_string()).await;
				Err(e.into())
			}
		}
	}

	pub async fn sign_in(&self, scopes: &[Scope]) -> Result<User, HandshakeError> {
		let sdk = self.wallet.config();
		self.session
			.log(
				Level::Info,
				format!(
					"Wallet SDK v{} from {SDK_URL} (sandbox={})",
					sdk.version, sdk.sandbox
				),
			)
			.await;
		if self.environment.requires_sandbox() && !sdk.sandbox {
			self.session
				.log(
					Level::Warn,
					"Not in the wallet browser: only sandbox payments will go through",
				)
				.await;
		}

		let auth = match self.wallet.authenticate(scopes).await {
			Ok(auth) => auth,
			Err(e) => {
				self.session.set_status(format!("Sign-in failed: {e}")).await;
				return Err(e.into());
			}
		};

		let request = AuthRequest::AccessToken {
			access_token: auth.access_token,
		};
		let response = match self.relay.authenticate(&request).await {
			Ok(response) => response,
			Err(e) => {
				self.session.set_status(format!("Sign-in failed: {e}")).await;
				return Err(e.into());
			}
		};

		let user = User {
			uid:      auth.user.uid.or(response.user.uid),
			username: auth.user.username,
			session:  response.user.session,
		};
		self.session.set_user(user.clone()).await;
		self.session
			.set_status(format!("Signed in as {}", user.username))
			.await;
		Ok(user)
	}

	/// Creates the payment on the relay, then hands it to the wallet.
	pub async fn start_payment(
		&self,
		request: CreatePaymentRequest,
	) -> Result<String, HandshakeError> {
		self.environment.ensure_can_pay()?;
		self.session.reserve_slot().await?;

		let created = match self.relay.create_payment(&request).await {
			Ok(created) => created,
			Err(e) => {
				self.session.release_slot().await;
				self.session
					.set_status(format!("Payment creation failed: {e}"))
					.await;
				return Err(e.into());
			}
		};

		let payment_id = created.payment.identifier;
		self.session.register(&payment_id).await;
		self.session
			.log(
				Level::Info,
				format!("Payment {payment_id} created for {}", request.amount),
			)
			.await;

		let descriptor = PaymentDescriptor {
			identifier: payment_id.clone(),
			amount:     request.amount,
			memo:       request.memo,
			metadata:   request.metadata,
		};
		if let Err(e) = self.wallet.create_payment(descriptor).await {
			self.on_error(&e.to_string(), Some(&payment_id)).await?;
			return Err(e.into());
		}

		self.session
			.set_status(format!("Payment {payment_id} awaiting wallet approval"))
			.await;
		Ok(payment_id)
	}

	pub async fn handle_event(&self, event: SdkEvent) -> Result<(), HandshakeError> {
		match event {
			SdkEvent::ReadyForServerApproval { payment_id } => {
				self.on_ready_for_server_approval(&payment_id).await?;
			}
			SdkEvent::ReadyForServerCompletion { payment_id, txid } => {
				self.on_ready_for_server_completion(&payment_id, &txid)
					.await?;
			}
			SdkEvent::Cancelled { payment_id } => {
				self.on_cancel(&payment_id).await?;
			}
			SdkEvent::Failed { error, payment_id } => {
				self.on_error(&error, payment_id.as_deref()).await?;
			}
		}
		Ok(())
	}

	/// Consumes wallet events until the wallet drops its sender.
	pub async fn run(&self, mut events: mpsc::UnboundedReceiver<SdkEvent>) {
		while let Some(event) = events.recv().await {
			if let Err(e) = self.handle_event(event).await {
				self.session
					.log(Level::Error, format!("Handshake step failed: {e}"))
					.await;
			}
		}
	}

	pub async fn on_ready_for_server_approval(
		&self,
		payment_id: &str,
	) -> Result<HandshakeState, HandshakeError> {
		self.expect_state(payment_id, "approved", |s| {
			matches!(s, HandshakeState::Created)
		})
		.await?;

		let approval = match self.relay.approve_payment(payment_id).await {
			Ok(approval) => approval,
			Err(e) => {
				self.session
					.set_status(format!("Approval of {payment_id} failed: {e}"))
					.await;
				return Err(e.into());
			}
		};

		self.session
			.advance(payment_id, HandshakeEvent::Approved {
				txid: approval.txid.clone(),
			})
			.await?;
		self.session
			.set_status(format!("Payment {payment_id} approved"))
			.await;

		if let Err(e) = self.wallet.complete_payment(payment_id, &approval.txid).await {
			self.session
				.set_status(format!("Wallet completion of {payment_id} failed: {e}"))
				.await;
			return Err(e.into());
		}

		self.finish(payment_id, &approval.txid).await
	}

	/// The wallet completed on its own; only the relay still has to hear
	/// about it.
	pub async fn on_ready_for_server_completion(
		&self,
		payment_id: &str,
		txid: &str,
	) -> Result<HandshakeState, HandshakeError> {
		match self.session.state(payment_id).await {
			Some(HandshakeState::Approved { .. }) => self.finish(payment_id, txid).await,
			Some(state) if state.is_terminal() => {
				self.session
					.log(
						Level::Warn,
						format!("Ignoring completion of {payment_id}: already {state}"),
					)
					.await;
				Ok(state)
			}
			Some(state) => Err(HandshakeError::InvalidTransition {
				payment_id: payment_id.to_string(),
				from:       state.name(),
				event:      "completed",
			}),
			None => Err(HandshakeError::UnknownPayment {
				payment_id: payment_id.to_string(),
			}),
		}
	}

	pub async fn on_cancel(
		&self,
		payment_id: &str,
	) -> Result<HandshakeState, HandshakeError> {
		let state = self
			.session
			.advance(payment_id, HandshakeEvent::Cancelled)
			.await?;

		let mut notice = self.notice(payment_id, None, PaymentStatus::Cancelled);
		notice
			.extra
			.insert("reason".to_string(), "user_cancelled".into());
		self.notify(notice).await;

		self.session
			.set_status(format!("Payment {payment_id} cancelled"))
			.await;
		Ok(state)
	}

	/// Without a payment id the error applies to every unfinished handshake.
	pub async fn on_error(
		&self,
		error: &str,
		payment_id: Option<&str>,
	) -> Result<(), HandshakeError> {
		let targets = match payment_id {
			Some(id) => vec![id.to_string()],
			None => self.session.in_flight().await,
		};

		for id in &targets {
			let failed = self
				.session
				.advance(id, HandshakeEvent::Failed {
					message: error.to_string(),
				})
				.await;
			if let Err(e) = failed {
				if payment_id.is_some() {
					return Err(e);
				}
				// Finished after the in-flight snapshot was taken.
				self.session
					.log(Level::Warn, format!("Skipping {id}: {e}"))
					.await;
				continue;
			}

			let mut notice = self.notice(id, None, PaymentStatus::Error);
			notice.extra.insert("error".to_string(), error.into());
			self.notify(notice).await;
		}

		self.session
			.set_status(format!("Payment error: {error}"))
			.await;
		Ok(())
	}

	/// Relay `complete` then `callback`; the handshake stays `Approved` if
	/// either fails.
	async fn finish(
		&self,
		payment_id: &str,
		txid: &str,
	) -> Result<HandshakeState, HandshakeError> {
		if let Err(e) = self.relay.complete_payment(payment_id, txid).await {
			self.session
				.set_status(format!("Completion of {payment_id} failed: {e}"))
				.await;
			return Err(e.into());
		}

		let notice = self.notice(payment_id, Some(txid), PaymentStatus::Completed);
		if let Err(e) = self.relay.notify_callback(&notice).await {
			self.session
				.set_status(format!("Completion notice for {payment_id} failed: {e}"))
				.await;
			return Err(e.into());
		}

		let state = self
			.session
			.advance(payment_id, HandshakeEvent::Completed)
			.await?;
		self.session
			.set_status(format!("Payment {payment_id} completed"))
			.await;
		Ok(state)
	}

	async fn expect_state(
		&self,
		payment_id: &str,
		event: &'static str,
		allowed: impl Fn(&HandshakeState) -> bool,
	) -> Result<(), HandshakeError> {
		match self.session.state(payment_id).await {
			Some(state) if allowed(&state) => Ok(()),
			Some(state) => Err(HandshakeError::InvalidTransition {
				payment_id: payment_id.to_string(),
				from: state.name(),
				event,
			}),
			None => Err(HandshakeError::UnknownPayment {
				payment_id: payment_id.to_string(),
			}),
		}
	}

	fn notice(
		&self,
		payment_id: &str,
		txid: Option<&str>,
		status: PaymentStatus,
	) -> CallbackRequest {
		CallbackRequest {
			payment_id: payment_id.to_string(),
			txid:       txid.map(str::to_string),
			status:     status.to_string(),
			extra:      serde_json::Map::new(),
		}
	}

	/// Fire-and-forget: failures are logged, never retried.
	async fn notify(&self, notice: CallbackRequest) {
		if let Err(e) = self.relay.notify_callback(&notice).await {
			self.session
				.log(
					Level::Warn,
					format!(
						"Could not notify relay that {} is {}: {e}",
						notice.payment_id, notice.status
					),
				)
				.await;
		}
	}
}
