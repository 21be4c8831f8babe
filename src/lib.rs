use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::{App, HttpServer};
use log::info;

use crate::adapters::web::routes::RelayServices;
use crate::domain::policy::TransitionPolicy;
use crate::domain::validation_key::ValidationKey;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::persistence::in_memory_payment_repository::InMemoryPaymentRepository;

pub mod adapters;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod use_cases;

pub async fn run(config: Arc<Config>) -> std::io::Result<()> {
	let validation_key = load_validation_key(config.validation_key_path.as_deref())?;
	let policy = TransitionPolicy::from_flag(config.strict_transitions);
	let services = RelayServices::new(
		InMemoryPaymentRepository::new(),
		policy,
		validation_key,
		Instant::now(),
	);

	info!(
		"Starting Actix-Web server on {}:{} ({policy:?} transitions)...",
		config.server_host, config.server_port
	);
	HttpServer::new(move || {
		App::new().configure(|cfg| services.configure(cfg))
	})
	.keep_alive(Duration::from_secs(config.server_keepalive))
	.bind((config.server_host.as_str(), config.server_port))?
	.run()
	.await
}

/// A configured key that fails validation aborts startup.
pub fn load_validation_key(
	path: Option<&str>,
) -> std::io::Result<Option<ValidationKey>> {
	let Some(path) = path else {
		info!("No validation key configured");
		return Ok(None);
	};

	let raw = std::fs::read_to_string(path)?;
	let key = ValidationKey::parse(&raw)
		.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
	info!("Serving validation key from {path}");
	Ok(Some(key))
}
