use log::info;
use uuid::Uuid;

use crate::domain::user::{UNVERIFIED_USERNAME, User};
use crate::use_cases::dto::AuthenticateCommand;

/// Access tokens are not verified against the wallet network.
#[derive(Clone, Default)]
pub struct AuthenticateUseCase;

impl AuthenticateUseCase {
	pub fn new() -> Self {
		Self
	}

	pub fn execute(&self, command: AuthenticateCommand) -> User {
		let session = Some(Uuid::new_v4());
		match command {
			AuthenticateCommand::AccessToken(token) => {
				info!("Access token received ({} chars)", token.len());
				User {
					uid: None,
					username: UNVERIFIED_USERNAME.to_string(),
					session,
				}
			}
			AuthenticateCommand::Identity { uid, username } => {
				info!("Sign-in for {username} ({uid})");
				User {
					uid: Some(uid),
					username,
					session,
				}
			}
		}
	}
}
