pub mod auth_handler;
pub mod errors;
pub mod handlers;
pub mod health_handler;
pub mod payments_handler;
pub mod routes;
pub mod schema;

pub type Repository =
	crate::infrastructure::persistence::in_memory_payment_repository::InMemoryPaymentRepository;
