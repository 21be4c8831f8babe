pub mod callback;
pub mod errors;
pub mod payment;
pub mod policy;
pub mod repository;
pub mod user;
pub mod validation_key;
