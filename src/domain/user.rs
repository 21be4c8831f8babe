use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reported for access-token sign-ins, which are never verified.
pub const UNVERIFIED_USERNAME: &str = "TestUser";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct User {
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub uid:      Option<String>,
	pub username: String,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub session:  Option<Uuid>,
}
