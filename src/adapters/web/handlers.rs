pub use crate::adapters::web::auth_handler::authenticate;
pub use crate::adapters::web::health_handler::{health, index, validation_key};
pub use crate::adapters::web::payments_handler::{
	approve_payment, complete_payment, create_payment, payment_callback,
	payment_details,
};
