use std::fmt;

/// Client-local lifecycle of one payment.
#[derive(Debug, Clone, PartialEq)]
pub enum HandshakeState {
	Idle,
	Created,
	Approved { txid: String },
	Completed { txid: String },
	Cancelled,
	Error { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum HandshakeEvent {
	Created,
	Approved { txid: String },
	Completed,
	Cancelled,
	Failed { message: String },
}

impl HandshakeEvent {
	pub fn name(&self) -> &'static str {
		match self {
			HandshakeEvent::Created => "created",
			HandshakeEvent::Approved { .. } => "approved",
			HandshakeEvent::Completed => "completed",
			HandshakeEvent::Cancelled => "cancelled",
			HandshakeEvent::Failed { .. } => "failed",
		}
	}
}

impl HandshakeState {
	pub fn name(&self) -> &'static str {
		match self {
			HandshakeState::Idle => "idle",
			HandshakeState::Created => "created",
			HandshakeState::Approved { .. } => "approved",
			HandshakeState::Completed { .. } => "completed",
			HandshakeState::Cancelled => "cancelled",
			HandshakeState::Error { .. } => "error",
		}
	}

	pub fn is_terminal(&self) -> bool {
		matches!(
			self,
			HandshakeState::Completed { .. } |
				HandshakeState::Cancelled |
				HandshakeState::Error { .. }
		)
	}

	/// Next state, or `None` when `event` is not legal from here.
	pub fn apply(&self, event: HandshakeEvent) -> Option<HandshakeState> {
		match (self, event) {
			(HandshakeState::Idle, HandshakeEvent::Created) => {
				Some(HandshakeState::Created)
			}
			(HandshakeState::Created, HandshakeEvent::Approved { txid }) => {
				Some(HandshakeState::Approved { txid })
			}
			(HandshakeState::Approved { txid }, HandshakeEvent::Completed) => {
				Some(HandshakeState::Completed { txid: txid.clone() })
			}
			(
				HandshakeState::Created | HandshakeState::Approved { .. },
				HandshakeEvent::Cancelled,
			) => Some(HandshakeState::Cancelled),
			(state, HandshakeEvent::Failed { message }) if !state.is_terminal() => {
				Some(HandshakeState::Error { message })
			}
			_ => None,
		}
	}
}

impl fmt::Display for HandshakeState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			HandshakeState::Approved { txid } | HandshakeState::Completed { txid } => {
				write!(f, "{} ({txid})", self.name())
			}
			HandshakeState::Error { message } => write!(f, "error ({message})"),
			_ => f.write_str(self.name()),
		}
	}
}
