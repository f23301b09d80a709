//! Persisted bet records and the settlement receipt.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::id::{BetId, PlayerId, SelectionId, TransactionId};
use super::money::{Amount, Odds};

/// One persisted leg of a bet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub selection_id: SelectionId,
    pub odds: Odds,
    pub bet_id: BetId,
}

/// A persisted bet with its legs in slip order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bet {
    pub id: BetId,
    pub player_id: PlayerId,
    pub stake_amount: Amount,
    pub selections: Vec<Selection>,
    pub created_at: DateTime<Utc>,
}

/// Audit record of one balance debit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceTransaction {
    pub id: TransactionId,
    pub player_id: PlayerId,
    pub bet_id: BetId,
    /// Amount debited (the stake).
    pub amount: Amount,
    /// Balance before the debit was applied.
    pub amount_before: Amount,
    pub created_at: DateTime<Utc>,
}

/// Fields of a balance transaction not yet assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBalanceTransaction {
    pub player_id: PlayerId,
    pub bet_id: BetId,
    pub amount: Amount,
    pub amount_before: Amount,
}

/// Receipt returned by a committed settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub bet_id: BetId,
    pub transaction_id: TransactionId,
    pub player_id: PlayerId,
    pub balance_before: Amount,
    pub balance_after: Amount,
}

impl Settlement {
    /// Amount debited by this settlement.
    #[must_use]
    pub fn stake(&self) -> Amount {
        self.balance_before - self.balance_after
    }
}
