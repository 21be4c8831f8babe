pub mod sandbox_wallet;
