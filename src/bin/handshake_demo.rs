//! Drives one payment through a running relay with the sandbox wallet.
//!
//! `handshake-demo [approve|cancel|fail]`

use std::sync::Arc;
use std::time::Duration;

use time::format_description::well_known::Rfc3339;
use tokio::time::timeout;
use wallet_relay::adapters::web::schema::CreatePaymentRequest;
use wallet_relay::client::driver::HandshakeDriver;
use wallet_relay::client::environment::HostEnvironment;
use wallet_relay::client::session::ClientSession;
use wallet_relay::client::wallet_sdk::{SdkConfig, Scope};
use wallet_relay::infrastructure::config::settings::Config;
use wallet_relay::infrastructure::http::relay_http_client::HttpRelayClient;
use wallet_relay::infrastructure::sdk::sandbox_wallet::{
	SandboxDecision, SandboxWallet,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();
	let config = Config::load()?;

	let decision = match std::env::args().nth(1).as_deref() {
		Some("cancel") => SandboxDecision::Cancel,
		Some("fail") => SandboxDecision::Fail {
			error: "simulated wallet failure".to_string(),
		},
		_ => SandboxDecision::Approve,
	};

	let relay = HttpRelayClient::new(
		config.relay_url.as_str(),
		Duration::from_secs(config.request_timeout_secs),
	)?;
	let (wallet, mut events) = SandboxWallet::new(
		SdkConfig {
			version: config.sdk_version.clone(),
			sandbox: config.sdk_sandbox,
		},
		decision,
	);
	let environment = HostEnvironment::detect(
		&format!("handshake-demo/{}", env!("CARGO_PKG_VERSION")),
		true,
	);
	let session = Arc::new(ClientSession::new(
		config.max_concurrent_handshakes,
		config.console_capacity,
	));
	let driver = HandshakeDriver::new(relay, wallet, session.clone(), environment);

	driver.check_relay().await?;
	driver.sign_in(&[Scope::Username, Scope::Payments]).await?;

	let payment_id = driver
		.start_payment(CreatePaymentRequest {
			amount:   0.001,
			memo:     "Test transaction".to_string(),
			metadata: serde_json::json!({ "source": "handshake-demo" }),
		})
		.await?;

	while let Ok(Some(event)) = timeout(Duration::from_secs(5), events.recv()).await {
		if let Err(e) = driver.handle_event(event).await {
			eprintln!("Handshake step failed: {e}");
		}
		if session
			.state(&payment_id)
			.await
			.is_none_or(|state| state.is_terminal())
		{
			break;
		}
	}

	for line in session.console().await {
		let at = line.at.format(&Rfc3339).unwrap_or_default();
		println!("{at} {:<5} {}", line.level, line.message);
	}
	println!("Final status: {}", session.status().await);
	Ok(())
}
