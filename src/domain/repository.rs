use async_trait::async_trait;

use crate::domain::callback::{CallbackNotice, CallbackOutcome};
use crate::domain::payment::{PaymentIntent, PaymentStatus};

#[async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
	async fn save(
		&self,
		payment: PaymentIntent,
	) -> Result<(), Box<dyn std::error::Error + Send>>;
	/// Writes `payment` only if the stored copy is still in `expected`.
	/// Returns `false` when another writer moved the payment first.
	async fn save_if_status(
		&self,
		payment: PaymentIntent,
		expected: PaymentStatus,
	) -> Result<bool, Box<dyn std::error::Error + Send>>;
	async fn find(
		&self,
		identifier: &str,
	) -> Result<Option<PaymentIntent>, Box<dyn std::error::Error + Send>>;
	async fn record_callback(
		&self,
		notice: CallbackNotice,
	) -> Result<CallbackOutcome, Box<dyn std::error::Error + Send>>;
	async fn callbacks_for(
		&self,
		identifier: &str,
	) -> Result<Vec<CallbackNotice>, Box<dyn std::error::Error + Send>>;
}
