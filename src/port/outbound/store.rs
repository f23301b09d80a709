//! Persistence port for players, bets and balance transactions.

use rust_decimal::Decimal;

use crate::domain::{
    BalanceTransaction, Bet, BetId, NewBalanceTransaction, Player, PlayerId, SlipSelection,
    TransactionId,
};
use crate::error::{LedgerError, Result};

/// Read-only access to player state, used by validation.
pub trait PlayerLookup: Send + Sync {
    /// Get a player by ID.
    fn find_player(&self, id: PlayerId) -> Result<Option<Player>>;
}

/// Writes available inside one store transaction.
///
/// Nothing written through a unit is visible to other readers until the
/// enclosing [`LedgerStore::transaction`] commits.
pub trait LedgerUnit {
    /// Read the current player row.
    fn find_player(&mut self, id: PlayerId) -> Result<Option<Player>>;

    /// Insert a player with the given starting balance.
    fn create_player(&mut self, id: PlayerId, balance: Decimal) -> Result<Player>;

    /// Set the player's balance if the row still has `player.version()`.
    ///
    /// Returns `false`, writing nothing, when another writer got there first.
    fn update_player_balance(&mut self, player: &Player, new_balance: Decimal) -> Result<bool>;

    /// Insert a bet and return its ID.
    fn create_bet(&mut self, player_id: PlayerId, stake_amount: Decimal) -> Result<BetId>;

    /// Insert the legs of a bet, preserving order.
    fn create_selections(&mut self, bet_id: BetId, selections: &[SlipSelection]) -> Result<()>;

    /// Append a balance transaction and return its ID.
    fn append_transaction(&mut self, transaction: &NewBalanceTransaction) -> Result<TransactionId>;
}

/// Transactional store the ledger writes through.
pub trait LedgerStore: PlayerLookup {
    /// Run `work` as one all-or-nothing unit.
    ///
    /// The unit commits if `work` returns `Ok` and rolls back otherwise.
    fn transaction<T, F>(&self, work: F) -> std::result::Result<T, LedgerError>
    where
        F: FnOnce(&mut dyn LedgerUnit) -> std::result::Result<T, LedgerError>;

    /// Get a bet with its selections.
    fn find_bet(&self, id: BetId) -> Result<Option<Bet>>;

    /// List a player's balance transactions, oldest first.
    fn player_transactions(&self, player_id: PlayerId) -> Result<Vec<BalanceTransaction>>;
}
