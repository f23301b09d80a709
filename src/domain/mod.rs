//! Storage-agnostic domain logic: slips, players, bets, rules and the error catalog.

pub mod bet;
pub mod catalog;
pub mod id;
pub mod limits;
pub mod money;
pub mod player;
pub mod rules;
pub mod slip;
pub mod violation;

// Core domain types
pub use bet::{BalanceTransaction, Bet, NewBalanceTransaction, Selection, Settlement};
pub use catalog::{ErrorCatalog, ErrorEntry};
pub use id::{BetId, PlayerId, SelectionId, TransactionId};
pub use limits::BetLimits;
pub use player::Player;
pub use rules::RuleSet;
pub use slip::{BetSlip, SelectionRequest, SlipRequest, SlipSelection};
pub use violation::ViolationKind;
