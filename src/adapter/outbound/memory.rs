//! In-memory ledger store for testing.
//!
//! Transactions run against a private copy of the tables and replace them on
//! commit, so a failed unit leaves the store untouched. The store mutex is
//! held for the whole unit, which makes transactions serializable. Failures
//! and balance conflicts can be injected to exercise rollback paths.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::{
    BalanceTransaction, Bet, BetId, NewBalanceTransaction, Player, PlayerId, Selection,
    SlipSelection, TransactionId,
};
use crate::error::{Error, LedgerError, Result};
use crate::port::outbound::store::{LedgerStore, LedgerUnit, PlayerLookup};

/// Unit-of-work operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerStep {
    FindPlayer,
    CreatePlayer,
    UpdateBalance,
    CreateBet,
    CreateSelections,
    AppendTransaction,
}

#[derive(Debug, Default, Clone)]
struct Tables {
    players: HashMap<PlayerId, Player>,
    bets: Vec<Bet>,
    transactions: Vec<BalanceTransaction>,
}

#[derive(Debug, Default)]
struct Faults {
    fail_at: Option<LedgerStep>,
    conflicts: u32,
}

/// In-memory store for testing purposes.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    tables: Mutex<Tables>,
    faults: Mutex<Faults>,
}

impl MemoryLedgerStore {
    /// Create a new empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a player outside of any settlement.
    pub fn seed_player(&self, id: PlayerId, balance: Decimal) {
        self.tables
            .lock()
            .players
            .insert(id, Player::new(id, balance, 0));
    }

    /// Make every later unit fail when it reaches `step`.
    pub fn fail_at(&self, step: LedgerStep) {
        self.faults.lock().fail_at = Some(step);
    }

    /// Remove an injected failure.
    pub fn heal(&self) {
        self.faults.lock().fail_at = None;
    }

    /// Make the next `count` balance updates report a version conflict.
    pub fn inject_conflicts(&self, count: u32) {
        self.faults.lock().conflicts = count;
    }

    #[must_use]
    pub fn bet_count(&self) -> usize {
        self.tables.lock().bets.len()
    }

    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.tables.lock().transactions.len()
    }
}

struct MemoryUnit<'a> {
    tables: &'a mut Tables,
    faults: &'a Mutex<Faults>,
}

impl MemoryUnit<'_> {
    fn step(&self, step: LedgerStep) -> Result<()> {
        if self.faults.lock().fail_at == Some(step) {
            return Err(Error::Database(format!("injected failure at {step:?}")));
        }
        Ok(())
    }
}

impl LedgerUnit for MemoryUnit<'_> {
    fn find_player(&mut self, id: PlayerId) -> Result<Option<Player>> {
        self.step(LedgerStep::FindPlayer)?;
        Ok(self.tables.players.get(&id).cloned())
    }

    fn create_player(&mut self, id: PlayerId, balance: Decimal) -> Result<Player> {
        self.step(LedgerStep::CreatePlayer)?;
        if self.tables.players.contains_key(&id) {
            return Err(Error::Database(format!("player {id} already exists")));
        }
        let player = Player::new(id, balance, 0);
        self.tables.players.insert(id, player.clone());
        Ok(player)
    }

    fn update_player_balance(&mut self, player: &Player, new_balance: Decimal) -> Result<bool> {
        self.step(LedgerStep::UpdateBalance)?;
        {
            let mut faults = self.faults.lock();
            if faults.conflicts > 0 {
                faults.conflicts -= 1;
                return Ok(false);
            }
        }

        match self.tables.players.get_mut(&player.id()) {
            Some(current) if current.version() == player.version() => {
                *current = Player::new(player.id(), new_balance, player.version() + 1);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn create_bet(&mut self, player_id: PlayerId, stake_amount: Decimal) -> Result<BetId> {
        self.step(LedgerStep::CreateBet)?;
        let id = BetId::new(next_row_id(self.tables.bets.len())?);
        self.tables.bets.push(Bet {
            id,
            player_id,
            stake_amount,
            selections: Vec::new(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    fn create_selections(&mut self, bet_id: BetId, selections: &[SlipSelection]) -> Result<()> {
        self.step(LedgerStep::CreateSelections)?;
        let bet = self
            .tables
            .bets
            .iter_mut()
            .find(|b| b.id == bet_id)
            .ok_or_else(|| Error::Database(format!("bet {bet_id} not found")))?;

        for leg in selections {
            if bet.selections.iter().any(|s| s.selection_id == leg.id) {
                return Err(Error::Database(format!(
                    "duplicate selection {} on bet {bet_id}",
                    leg.id
                )));
            }
            bet.selections.push(Selection {
                selection_id: leg.id,
                odds: leg.odds,
                bet_id,
            });
        }
        Ok(())
    }

    fn append_transaction(&mut self, transaction: &NewBalanceTransaction) -> Result<TransactionId> {
        self.step(LedgerStep::AppendTransaction)?;
        let id = TransactionId::new(next_row_id(self.tables.transactions.len())?);
        self.tables.transactions.push(BalanceTransaction {
            id,
            player_id: transaction.player_id,
            bet_id: transaction.bet_id,
            amount: transaction.amount,
            amount_before: transaction.amount_before,
            created_at: Utc::now(),
        });
        Ok(id)
    }
}

fn next_row_id(len: usize) -> Result<i64> {
    i64::try_from(len)
        .map(|n| n + 1)
        .map_err(|e| Error::Database(e.to_string()))
}

impl PlayerLookup for MemoryLedgerStore {
    fn find_player(&self, id: PlayerId) -> Result<Option<Player>> {
        Ok(self.tables.lock().players.get(&id).cloned())
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn transaction<T, F>(&self, work: F) -> std::result::Result<T, LedgerError>
    where
        F: FnOnce(&mut dyn LedgerUnit) -> std::result::Result<T, LedgerError>,
    {
        let mut tables = self.tables.lock();
        let mut working = tables.clone();

        let value = work(&mut MemoryUnit {
            tables: &mut working,
            faults: &self.faults,
        })?;

        *tables = working;
        Ok(value)
    }

    fn find_bet(&self, id: BetId) -> Result<Option<Bet>> {
        Ok(self.tables.lock().bets.iter().find(|b| b.id == id).cloned())
    }

    fn player_transactions(&self, player_id: PlayerId) -> Result<Vec<BalanceTransaction>> {
        Ok(self
            .tables
            .lock()
            .transactions
            .iter()
            .filter(|t| t.player_id == player_id)
            .cloned()
            .collect())
    }
}
