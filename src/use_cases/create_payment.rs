use log::info;

use crate::domain::errors::RelayError;
use crate::domain::payment::PaymentIntent;
use crate::domain::repository::PaymentRepository;
use crate::use_cases::dto::CreatePaymentCommand;

#[derive(Clone)]
pub struct CreatePaymentUseCase<R: PaymentRepository> {
	payment_repo: R,
}

impl<R: PaymentRepository> CreatePaymentUseCase<R> {
	pub fn new(payment_repo: R) -> Self {
		Self { payment_repo }
	}

	pub async fn execute(
		&self,
		command: CreatePaymentCommand,
	) -> Result<PaymentIntent, RelayError> {
		let payment =
			PaymentIntent::new(command.amount, command.memo, command.metadata);

		self.payment_repo.save(payment.clone()).await?;
		info!(
			"Payment {} created: amount={} memo={:?}",
			payment.identifier, payment.amount, payment.memo
		);
		Ok(payment)
	}
}
