use log::{info, warn};

use crate::domain::errors::RelayError;
use crate::domain::payment::PaymentStatus;
use crate::domain::policy::TransitionPolicy;
use crate::domain::repository::PaymentRepository;
use crate::use_cases::dto::CompletePaymentCommand;

#[derive(Clone)]
pub struct CompletePaymentUseCase<R: PaymentRepository> {
	payment_repo: R,
	policy:       TransitionPolicy,
}

impl<R: PaymentRepository> CompletePaymentUseCase<R> {
	pub fn new(payment_repo: R, policy: TransitionPolicy) -> Self {
		Self {
			payment_repo,
			policy,
		}
	}

	pub async fn execute(
		&self,
		command: CompletePaymentCommand,
	) -> Result<CompletePaymentCommand, RelayError> {
		let Some(mut payment) = self.payment_repo.find(&command.payment_id).await?
		else {
			if self.policy.is_strict() {
				return Err(RelayError::PaymentNotFound {
					identifier: command.payment_id,
				});
			}
			warn!("Completing unknown payment {}", command.payment_id);
			return Ok(command);
		};

		let previous = payment.status;
		if !previous.can_transition_to(PaymentStatus::Completed) {
			let err = RelayError::InvalidTransition {
				identifier: command.payment_id.clone(),
				from:       previous,
				to:         PaymentStatus::Completed,
			};
			if self.policy.is_strict() {
				return Err(err);
			}
			warn!("{err} Acknowledging anyway.");
			return Ok(command);
		}

		if payment.txid.as_deref() != Some(command.txid.as_str()) {
			if self.policy.is_strict() {
				return Err(RelayError::TxidMismatch {
					identifier: command.payment_id,
				});
			}
			warn!(
				"Payment {} completed with unexpected txid {}",
				command.payment_id, command.txid
			);
		}

		payment.transition(PaymentStatus::Completed)?;
		payment.txid.get_or_insert_with(|| command.txid.clone());
		if !self.payment_repo.save_if_status(payment, previous).await? {
			let err = RelayError::InvalidTransition {
				identifier: command.payment_id.clone(),
				from:       previous,
				to:         PaymentStatus::Completed,
			};
			if self.policy.is_strict() {
				return Err(err);
			}
			warn!("{err} Payment moved concurrently.");
			return Ok(command);
		}

		info!(
			"Payment {} completed with txid {}",
			command.payment_id, command.txid
		);
		Ok(command)
	}
}
