//! Client side of the payment handshake: drives the wallet SDK's lifecycle
//! callbacks and relays each step to the relay service.

pub mod driver;
pub mod environment;
pub mod errors;
pub mod handshake;
pub mod relay_api;
pub mod session;
pub mod wallet_sdk;
