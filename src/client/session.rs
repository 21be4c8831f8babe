use std::collections::{HashMap, VecDeque};

use log::Level;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::client::errors::HandshakeError;
use crate::client::handshake::{HandshakeEvent, HandshakeState};
use crate::domain::user::User;

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleLine {
	pub at:      OffsetDateTime,
	pub level:   Level,
	pub message: String,
}

/// Bounded on-screen console; the oldest line goes first.
#[derive(Debug)]
pub struct ConsoleLog {
	capacity: usize,
	lines:    VecDeque<ConsoleLine>,
}

impl ConsoleLog {
	pub fn new(capacity: usize) -> Self {
		Self {
			capacity: capacity.max(1),
			lines:    VecDeque::with_capacity(capacity.max(1)),
		}
	}

	pub fn push(&mut self, level: Level, message: String) {
		if self.lines.len() == self.capacity {
			self.lines.pop_front();
		}
		self.lines.push_back(ConsoleLine {
			at: OffsetDateTime::now_utc(),
			level,
			message,
		});
	}

	pub fn lines(&self) -> Vec<ConsoleLine> {
		self.lines.iter().cloned().collect()
	}
}

#[derive(Default)]
struct HandshakeTable {
	entries:  HashMap<String, HandshakeState>,
	/// Slots taken by payments whose relay `create` is still in flight.
	reserved: usize,
}

impl HandshakeTable {
	fn in_flight(&self) -> usize {
		self.entries.values().filter(|s| !s.is_terminal()).count() + self.reserved
	}
}

/// Everything the client knows about the signed-in user and their payments.
pub struct ClientSession {
	max_in_flight: usize,
	user:          RwLock<Option<User>>,
	status:        RwLock<String>,
	console:       RwLock<ConsoleLog>,
	handshakes:    RwLock<HandshakeTable>,
}

impl ClientSession {
	/// `max_in_flight == 0` lifts the cap on concurrent handshakes.
	pub fn new(max_in_flight: usize, console_capacity: usize) -> Self {
		Self {
			max_in_flight,
			user: RwLock::new(None),
			status: RwLock::new("idle".to_string()),
			console: RwLock::new(ConsoleLog::new(console_capacity)),
			handshakes: RwLock::new(HandshakeTable::default()),
		}
	}

	pub async fn log(&self, level: Level, message: impl Into<String>) {
		let message = message.into();
		log::log!(level, "{message}");
		self.console.write().await.push(level, message);
	}

	pub async fn console(&self) -> Vec<ConsoleLine> {
		self.console.read().await.lines()
	}

	pub async fn set_status(&self, status: impl Into<String>) {
		let status = status.into();
		self.log(Level::Info, format!("Status: {status}")).await;
		*self.status.write().await = status;
	}

	pub async fn status(&self) -> String {
		self.status.read().await.clone()
	}

	pub async fn set_user(&self, user: User) {
		*self.user.write().await = Some(user);
	}

	pub async fn user(&self) -> Option<User> {
		self.user.read().await.clone()
	}

	pub async fn reserve_slot(&self) -> Result<(), HandshakeError> {
		let mut table = self.handshakes.write().await;
		if self.max_in_flight > 0 && table.in_flight() >= self.max_in_flight {
			return Err(HandshakeError::PaymentInFlight {
				limit: self.max_in_flight,
			});
		}
		table.reserved += 1;
		Ok(())
	}

	pub async fn release_slot(&self) {
		let mut table = self.handshakes.write().await;
		table.reserved = table.reserved.saturating_sub(1);
	}

	/// Turns a reserved slot into a `Created` handshake.
	pub async fn register(&self, payment_id: &str) {
		let mut table = self.handshakes.write().await;
		table.reserved = table.reserved.saturating_sub(1);
		table
			.entries
			.insert(payment_id.to_string(), HandshakeState::Created);
	}

	pub async fn state(&self, payment_id: &str) -> Option<HandshakeState> {
		self.handshakes.read().await.entries.get(payment_id).cloned()
	}

	pub async fn advance(
		&self,
		payment_id: &str,
		event: HandshakeEvent,
	) -> Result<HandshakeState, HandshakeError> {
		let mut table = self.handshakes.write().await;
		let current = table.entries.get(payment_id).ok_or_else(|| {
			HandshakeError::UnknownPayment {
				payment_id: payment_id.to_string(),
			}
		})?;

		let event_name = event.name();
		let next =
			current
				.apply(event)
				.ok_or_else(|| HandshakeError::InvalidTransition {
					payment_id: payment_id.to_string(),
					from:       current.name(),
					event:      event_name,
				})?;

		table.entries.insert(payment_id.to_string(), next.clone());
		Ok(next)
	}

	/// Ids of every handshake that has not reached a terminal state.
	pub async fn in_flight(&self) -> Vec<String> {
		self.handshakes
			.read()
			.await
			.entries
			.iter()
			.filter(|(_, state)| !state.is_terminal())
			.map(|(id, _)| id.clone())
			.collect()
	}
}
