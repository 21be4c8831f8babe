/// How strictly the relay holds callers to the payment state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
	/// Acknowledge everything, move known payments only when the move is
	/// legal.
	#[default]
	Lenient,
	/// Reject unknown payments and illegal moves.
	Strict,
}

impl TransitionPolicy {
	pub fn from_flag(strict: bool) -> Self {
		if strict {
			TransitionPolicy::Strict
		} else {
			TransitionPolicy::Lenient
		}
	}

	pub fn is_strict(&self) -> bool {
		matches!(self, TransitionPolicy::Strict)
	}
}
