use crate::client::errors::HandshakeError;

/// User-agent token of the wallet's in-app browser.
pub const WALLET_BROWSER_TOKEN: &str = "PiBrowser";

#[derive(Debug, Clone, PartialEq)]
pub struct HostEnvironment {
	pub user_agent:        String,
	pub in_wallet_browser: bool,
	pub sdk_loaded:        bool,
}

impl HostEnvironment {
	pub fn detect(user_agent: &str, sdk_loaded: bool) -> Self {
		Self {
			user_agent: user_agent.to_string(),
			in_wallet_browser: user_agent.contains(WALLET_BROWSER_TOKEN),
			sdk_loaded,
		}
	}

	/// Outside the wallet browser only the sandbox network is reachable.
	pub fn requires_sandbox(&self) -> bool {
		!self.in_wallet_browser
	}

	pub fn ensure_can_pay(&self) -> Result<(), HandshakeError> {
		if self.sdk_loaded {
			Ok(())
		} else {
			Err(HandshakeError::SdkNotLoaded)
		}
	}

	pub fn describe(&self) -> String {
		format!(
			"host={} sdk={}",
			if self.in_wallet_browser {
				"wallet-browser"
			} else {
				"browser"
			},
			if self.sdk_loaded { "loaded" } else { "missing" }
		)
	}
}
