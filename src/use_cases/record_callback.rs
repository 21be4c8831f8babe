use log::{info, warn};
use time::OffsetDateTime;

use crate::domain::callback::{CallbackNotice, CallbackOutcome};
use crate::domain::errors::RelayError;
use crate::domain::payment::PaymentStatus;
use crate::domain::repository::PaymentRepository;
use crate::use_cases::dto::{CallbackReceipt, RecordCallbackCommand};

/// Callbacks are notifications: they are always acknowledged, whatever the
/// state of the payment they name.
#[derive(Clone)]
pub struct RecordCallbackUseCase<R: PaymentRepository> {
	payment_repo: R,
}

impl<R: PaymentRepository> RecordCallbackUseCase<R> {
	pub fn new(payment_repo: R) -> Self {
		Self { payment_repo }
	}

	pub async fn execute(
		&self,
		command: RecordCallbackCommand,
	) -> Result<CallbackReceipt, RelayError> {
		let notice = CallbackNotice {
			payment_id:  command.payment_id,
			txid:        command.txid,
			status:      command.status,
			extra:       command.extra,
			received_at: OffsetDateTime::now_utc(),
		};
		info!(
			"Callback received for {}: status={} txid={:?}",
			notice.payment_id, notice.status, notice.txid
		);

		match self.payment_repo.record_callback(notice.clone()).await? {
			CallbackOutcome::Recorded => {}
			CallbackOutcome::Duplicate => {
				info!(
					"Duplicate callback for {} ({}) acknowledged without effect",
					notice.payment_id, notice.status
				);
				return Ok(CallbackReceipt { duplicate: true });
			}
			CallbackOutcome::UnknownPayment => {
				info!("Callback for unknown payment {} not kept", notice.payment_id);
				return Ok(CallbackReceipt { duplicate: false });
			}
		}

		let status = match notice.status.parse::<PaymentStatus>() {
			Ok(status) => status,
			Err(e) => {
				info!("Callback for {} carries no ledger move: {e}", notice.payment_id);
				return Ok(CallbackReceipt { duplicate: false });
			}
		};

		let Some(mut payment) = self.payment_repo.find(&notice.payment_id).await?
		else {
			return Ok(CallbackReceipt { duplicate: false });
		};

		let previous = payment.status;
		match payment.transition(status) {
			Ok(()) => {
				if payment.txid.is_none() {
					payment.txid = notice.txid;
				}
				if !self.payment_repo.save_if_status(payment, previous).await? {
					warn!(
						"Payment {} moved concurrently, callback not applied",
						notice.payment_id
					);
				}
			}
			Err(e) => warn!("Ignoring callback move: {e}"),
		}

		Ok(CallbackReceipt { duplicate: false })
	}
}
