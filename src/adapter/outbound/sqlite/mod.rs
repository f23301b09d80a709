//! SQLite persistence.

pub mod database;
pub mod store;

pub use store::SqliteLedgerStore;
