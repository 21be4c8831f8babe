use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::RwLock;

use crate::domain::callback::{CallbackNotice, CallbackOutcome};
use crate::domain::payment::{PaymentIntent, PaymentStatus};
use crate::domain::repository::PaymentRepository;

/// Notices kept per payment; the oldest is dropped first.
pub const MAX_CALLBACKS_PER_PAYMENT: usize = 32;

#[derive(Default)]
struct Ledger {
	payments:  HashMap<String, PaymentIntent>,
	callbacks: HashMap<String, VecDeque<CallbackNotice>>,
}

/// Process-local ledger. Everything is lost on restart.
#[derive(Clone, Default)]
pub struct InMemoryPaymentRepository {
	ledger: Arc<RwLock<Ledger>>,
}

impl InMemoryPaymentRepository {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
	async fn save(
		&self,
		payment: PaymentIntent,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		let mut ledger = self.ledger.write().await;
		debug!("Saving payment {} as {}", payment.identifier, payment.status);
		ledger.payments.insert(payment.identifier.clone(), payment);
		Ok(())
	}

	async fn save_if_status(
		&self,
		payment: PaymentIntent,
		expected: PaymentStatus,
	) -> Result<bool, Box<dyn std::error::Error + Send>> {
		let mut ledger = self.ledger.write().await;
		match ledger.payments.get(&payment.identifier) {
			Some(stored) if stored.status == expected => {
				debug!(
					"Moving payment {} from {} to {}",
					payment.identifier, expected, payment.status
				);
				ledger.payments.insert(payment.identifier.clone(), payment);
				Ok(true)
			}
			_ => Ok(false),
		}
	}

	async fn find(
		&self,
		identifier: &str,
	) -> Result<Option<PaymentIntent>, Box<dyn std::error::Error + Send>> {
		let ledger = self.ledger.read().await;
		Ok(ledger.payments.get(identifier).cloned())
	}

	async fn record_callback(
		&self,
		notice: CallbackNotice,
	) -> Result<CallbackOutcome, Box<dyn std::error::Error + Send>> {
		let mut ledger = self.ledger.write().await;
		if !ledger.payments.contains_key(&notice.payment_id) {
			return Ok(CallbackOutcome::UnknownPayment);
		}

		let key = notice.dedup_key();
		let notices = ledger
			.callbacks
			.entry(notice.payment_id.clone())
			.or_default();
		if notices.iter().any(|kept| kept.dedup_key() == key) {
			return Ok(CallbackOutcome::Duplicate);
		}

		if notices.len() >= MAX_CALLBACKS_PER_PAYMENT {
			warn!(
				"Payment {} reached {MAX_CALLBACKS_PER_PAYMENT} callbacks, dropping the oldest",
				notice.payment_id
			);
			notices.pop_front();
		}
		notices.push_back(notice);
		Ok(CallbackOutcome::Recorded)
	}

	async fn callbacks_for(
		&self,
		identifier: &str,
	) -> Result<Vec<CallbackNotice>, Box<dyn std::error::Error + Send>> {
		let ledger = self.ledger.read().await;
		Ok(ledger
			.callbacks
			.get(identifier)
			.map(|notices| notices.iter().cloned().collect())
			.unwrap_or_default())
	}
}
