//! Atomic settlement of validated slips.
//!
//! A settlement debits the player and persists the bet, its selections and
//! the balance transaction in one store transaction. Settlements for the same
//! player are serialized by a per-player mutex; the balance write is also a
//! compare-and-swap on the player's version, retried on conflict, so writers
//! outside this process cannot cause a lost update either.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::domain::{BetSlip, NewBalanceTransaction, PlayerId, Settlement};
use crate::error::LedgerError;
use crate::port::outbound::store::LedgerStore;

/// Concurrency settings of the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSettings {
    /// Longest wait for another settlement of the same player to finish.
    pub lock_timeout: Duration,
    /// Extra attempts after a version conflict.
    pub max_retries: u32,
    /// Base delay between attempts, multiplied by the attempt number.
    pub retry_backoff: Duration,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_millis(5000),
            max_retries: 3,
            retry_backoff: Duration::from_millis(10),
        }
    }
}

/// One mutex per player, created on first use and dropped once released
/// by the last holder.
#[derive(Debug, Default)]
pub struct PlayerLocks {
    locks: DashMap<PlayerId, Arc<Mutex<()>>>,
}

impl PlayerLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the mutex guarding `player_id`.
    #[must_use]
    pub fn handle(&self, player_id: PlayerId) -> Arc<Mutex<()>> {
        self.locks.entry(player_id).or_default().clone()
    }

    /// Drop the mutex of `player_id` unless a handle is still held elsewhere.
    ///
    /// Callers must drop their own handle first.
    pub fn release(&self, player_id: PlayerId) {
        self.locks.remove_if(&player_id, |_, lock| Arc::strong_count(lock) == 1);
    }

    /// Number of players with a live mutex.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Performs settlements against a [`LedgerStore`].
pub struct LedgerEngine<S> {
    store: Arc<S>,
    locks: PlayerLocks,
    default_balance: Decimal,
    settings: LedgerSettings,
}

impl<S: LedgerStore> LedgerEngine<S> {
    /// Create a ledger engine.
    ///
    /// `default_balance` is the starting balance of players created on their
    /// first bet.
    pub fn new(store: Arc<S>, default_balance: Decimal, settings: LedgerSettings) -> Self {
        Self {
            store,
            locks: PlayerLocks::new(),
            default_balance,
            settings,
        }
    }

    /// Settle a validated slip.
    ///
    /// # Errors
    /// - [`LedgerError::LockTimeout`] if another settlement for the player
    ///   holds the lock for longer than the configured timeout
    /// - [`LedgerError::InsufficientBalance`] if the current balance no longer
    ///   covers the stake
    /// - [`LedgerError::RetriesExhausted`] if the balance kept changing
    ///   underneath every attempt
    /// - [`LedgerError::Store`] on any persistence failure
    ///
    /// Nothing is persisted when an error is returned.
    pub fn settle(&self, slip: &BetSlip) -> Result<Settlement, LedgerError> {
        let player_id = slip.player_id;
        let lock = self.locks.handle(player_id);
        let result = match lock.try_lock_for(self.settings.lock_timeout) {
            Some(_guard) => self.settle_with_retries(slip),
            None => {
                warn!(player_id = %player_id, "Settlement lock timed out");
                Err(LedgerError::LockTimeout { player_id })
            }
        };
        drop(lock);
        self.locks.release(player_id);
        result
    }

    fn settle_with_retries(&self, slip: &BetSlip) -> Result<Settlement, LedgerError> {
        let player_id = slip.player_id;
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.settle_once(slip) {
                Ok(settlement) => {
                    info!(
                        player_id = %player_id,
                        bet_id = %settlement.bet_id,
                        stake = %slip.stake_amount,
                        balance = %settlement.balance_after,
                        "Bet settled"
                    );
                    return Ok(settlement);
                }
                Err(LedgerError::Conflict { .. }) if attempt <= self.settings.max_retries => {
                    debug!(player_id = %player_id, attempt, "Balance conflict, retrying");
                    thread::sleep(self.settings.retry_backoff * attempt);
                }
                Err(LedgerError::Conflict { .. }) => {
                    warn!(player_id = %player_id, attempts = attempt, "Balance conflict persisted");
                    return Err(LedgerError::RetriesExhausted {
                        player_id,
                        attempts: attempt,
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn settle_once(&self, slip: &BetSlip) -> Result<Settlement, LedgerError> {
        let stake = slip.stake_amount;

        self.store.transaction(|unit| {
            let player = match unit.find_player(slip.player_id)? {
                Some(player) => player,
                None => {
                    debug!(player_id = %slip.player_id, "Creating player");
                    unit.create_player(slip.player_id, self.default_balance)?
                }
            };

            let balance_before = player.balance();
            let Some(balance_after) = player.debited(stake) else {
                return Err(LedgerError::InsufficientBalance {
                    player_id: player.id(),
                    balance: balance_before,
                    stake,
                });
            };

            if !unit.update_player_balance(&player, balance_after)? {
                return Err(LedgerError::Conflict {
                    player_id: player.id(),
                });
            }

            let bet_id = unit.create_bet(player.id(), stake)?;
            unit.create_selections(bet_id, &slip.selections)?;
            let transaction_id = unit.append_transaction(&NewBalanceTransaction {
                player_id: player.id(),
                bet_id,
                amount: stake,
                amount_before: balance_before,
            })?;

            Ok(Settlement {
                bet_id,
                transaction_id,
                player_id: player.id(),
                balance_before,
                balance_after,
            })
        })
    }
}
