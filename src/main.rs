use std::sync::Arc;

use wallet_relay::infrastructure::config::settings::Config;
use wallet_relay::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();
	let config = Arc::new(Config::load().expect("Failed to load configuration"));
	run(config).await
}
