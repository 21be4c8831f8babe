pub mod approve_payment;
pub mod authenticate;
pub mod complete_payment;
pub mod create_payment;
pub mod dto;
pub mod get_payment;
pub mod health_check;
pub mod record_callback;
