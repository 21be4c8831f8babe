use derive_more::derive::{Display, Error};

pub const VALIDATION_KEY_LEN: usize = 128;

#[derive(Debug, Display, Error, PartialEq)]
pub enum ValidationKeyError {
	#[display("Validation key must be 128 characters, got {len}.")]
	InvalidLength { len: usize },
	#[display("Validation key must be lowercase hex.")]
	NotLowercaseHex,
}

/// Domain-ownership proof served verbatim at `/validation-key.txt`.
#[derive(Debug, Display, Clone, PartialEq)]
pub struct ValidationKey(String);

impl ValidationKey {
	pub fn parse(raw: &str) -> Result<Self, ValidationKeyError> {
		let key = raw.trim();
		if key.len() != VALIDATION_KEY_LEN {
			return Err(ValidationKeyError::InvalidLength { len: key.len() });
		}
		if !key.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
			return Err(ValidationKeyError::NotLowercaseHex);
		}
		Ok(ValidationKey(key.to_string()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}
