//! Application services (use cases).
//!
//! These services combine the domain rules with the store to implement slip
//! validation and settlement.

pub mod ledger;
pub mod service;
pub mod validator;

pub use ledger::{LedgerEngine, LedgerSettings, PlayerLocks};
pub use service::BetService;
pub use validator::Validator;
