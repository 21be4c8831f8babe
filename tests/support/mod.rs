#![allow(dead_code)]

pub mod fake_relay;

use std::time::Instant;

use wallet_relay::adapters::web::routes::RelayServices;
use wallet_relay::domain::policy::TransitionPolicy;
use wallet_relay::domain::validation_key::ValidationKey;
use wallet_relay::infrastructure::persistence::in_memory_payment_repository::InMemoryPaymentRepository;

pub const VALIDATION_KEY: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

pub fn relay_services(policy: TransitionPolicy) -> RelayServices {
	RelayServices::new(
		InMemoryPaymentRepository::new(),
		policy,
		Some(ValidationKey::parse(VALIDATION_KEY).expect("valid test key")),
		Instant::now(),
	)
}
