use log::{info, warn};

use crate::domain::errors::RelayError;
use crate::domain::payment::{PaymentStatus, new_txid};
use crate::domain::policy::TransitionPolicy;
use crate::domain::repository::PaymentRepository;
use crate::use_cases::dto::{ApprovalResult, ApprovePaymentCommand};

#[derive(Clone)]
pub struct ApprovePaymentUseCase<R: PaymentRepository> {
	payment_repo: R,
	policy:       TransitionPolicy,
}

impl<R: PaymentRepository> ApprovePaymentUseCase<R> {
	pub fn new(payment_repo: R, policy: TransitionPolicy) -> Self {
		Self {
			payment_repo,
			policy,
		}
	}

	/// Every call fabricates a fresh txid. Only the first approval of a
	/// pending payment is written to the ledger.
	pub async fn execute(
		&self,
		command: ApprovePaymentCommand,
	) -> Result<ApprovalResult, RelayError> {
		let result = ApprovalResult {
			payment_id: command.payment_id,
			txid:       new_txid(),
		};

		let Some(mut payment) = self.payment_repo.find(&result.payment_id).await?
		else {
			if self.policy.is_strict() {
				return Err(RelayError::PaymentNotFound {
					identifier: result.payment_id,
				});
			}
			warn!("Approving unknown payment {}", result.payment_id);
			return Ok(result);
		};

		let previous = payment.status;
		let mut moved = false;
		if previous != PaymentStatus::Approved &&
			payment.transition(PaymentStatus::Approved).is_ok()
		{
			payment.txid = Some(result.txid.clone());
			moved = self.payment_repo.save_if_status(payment, previous).await?;
		}

		if !moved {
			let current = self
				.payment_repo
				.find(&result.payment_id)
				.await?
				.map_or(previous, |p| p.status);
			let err = RelayError::InvalidTransition {
				identifier: result.payment_id.clone(),
				from:       current,
				to:         PaymentStatus::Approved,
			};
			if self.policy.is_strict() {
				return Err(err);
			}
			warn!("{err} Issuing txid without recording it.");
			return Ok(result);
		}

		info!("Payment {} approved with txid {}", result.payment_id, result.txid);
		Ok(result)
	}
}
