pub mod transaction_repo;
pub mod user_repo;

// implementation modules
pub mod diesel_repo;
pub mod mem_repo;
