use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
	pub server_host:               String,
	pub server_port:               u16,
	pub server_keepalive:          u64,
	pub validation_key_path:       Option<String>,
	pub strict_transitions:        bool,
	pub relay_url:                 String,
	pub request_timeout_secs:      u64,
	pub sdk_version:               String,
	pub sdk_sandbox:               bool,
	pub max_concurrent_handshakes: usize,
	pub console_capacity:          usize,
}

impl Config {
	pub fn load() -> Result<Self, config::ConfigError> {
		let config_builder = config::Config::builder()
			.set_default("server_host", "0.0.0.0")?
			.set_default("server_port", 3000_i64)?
			.set_default("server_keepalive", 75_i64)?
			.set_default("strict_transitions", false)?
			.set_default("relay_url", "http://127.0.0.1:3000")?
			.set_default("request_timeout_secs", 30_i64)?
			.set_default("sdk_version", "2.0")?
			.set_default("sdk_sandbox", true)?
			.set_default("max_concurrent_handshakes", 1_i64)?
			.set_default("console_capacity", 50_i64)?
			.add_source(config::Environment::with_prefix("APP"))
			.build()?;

		config_builder.try_deserialize()
	}
}
