use crate::domain::callback::CallbackNotice;
use crate::domain::errors::RelayError;
use crate::domain::payment::PaymentIntent;
use crate::domain::repository::PaymentRepository;

#[derive(Clone)]
pub struct GetPaymentUseCase<R: PaymentRepository> {
	payment_repo: R,
}

impl<R: PaymentRepository> GetPaymentUseCase<R> {
	pub fn new(payment_repo: R) -> Self {
		Self { payment_repo }
	}

	pub async fn execute(
		&self,
		payment_id: &str,
	) -> Result<(PaymentIntent, Vec<CallbackNotice>), RelayError> {
		let payment = self.payment_repo.find(payment_id).await?.ok_or_else(|| {
			RelayError::PaymentNotFound {
				identifier: payment_id.to_string(),
			}
		})?;
		let callbacks = self.payment_repo.callbacks_for(payment_id).await?;
		Ok((payment, callbacks))
	}
}
