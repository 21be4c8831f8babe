pub mod in_memory_payment_repository;
