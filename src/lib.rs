//! Betslip - bet slip validation and atomic balance settlement.
//!
//! A submitted slip (player, stake, selections with odds) is checked against a
//! set of business rules. Every violation is reported with a stable numeric
//! code and a rendered message. A slip that passes is settled: the player's
//! balance is debited and the bet, its selections and an audit transaction are
//! written in one all-or-nothing store transaction. Settlements for the same
//! player never interleave.
//!
//! # Architecture
//!
//! - [`domain`] - Slips, players, bets, the rule set and the error catalog
//! - [`port`] - Inbound response types and the outbound store traits
//! - [`application`] - Validator, ledger engine and the bet service
//! - [`adapter`] - SQLite and in-memory stores, the CLI
//! - [`infrastructure`] - Configuration and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use betslip::adapter::outbound::sqlite::SqliteLedgerStore;
//! use betslip::application::{BetService, LedgerSettings};
//! use betslip::domain::{BetLimits, PlayerId, SelectionId, SlipRequest};
//! use rust_decimal_macros::dec;
//!
//! let store = SqliteLedgerStore::open("betslip.db", 5000)?;
//! let service = BetService::new(Arc::new(store), BetLimits::default(), LedgerSettings::default());
//!
//! let slip = SlipRequest::new(PlayerId::new(1), dec!(10), [(SelectionId::new(42), dec!(1.8))]);
//! match service.submit_bet(&slip) {
//!     Ok(settlement) => println!("balance now {}", settlement.balance_after),
//!     Err(errors) => println!("rejected: {:?}", errors.codes()),
//! }
//! # Ok::<(), betslip::error::Error>(())
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
