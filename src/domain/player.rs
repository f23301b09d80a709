//! Player balance state.

use serde::Serialize;

use super::id::PlayerId;
use super::money::Amount;

/// A player's balance row as read at the start of a settlement.
///
/// `version` increases by one on every balance write; the ledger uses it to
/// detect writers that raced between the read and the debit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    id: PlayerId,
    balance: Amount,
    version: i64,
}

impl Player {
    #[must_use]
    pub const fn new(id: PlayerId, balance: Amount, version: i64) -> Self {
        Self {
            id,
            balance,
            version,
        }
    }

    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub const fn balance(&self) -> Amount {
        self.balance
    }

    #[must_use]
    pub const fn version(&self) -> i64 {
        self.version
    }

    /// Return true if the balance covers `amount`.
    #[must_use]
    pub fn is_balance_sufficient(&self, amount: Amount) -> bool {
        self.balance >= amount
    }

    /// Balance left after debiting `amount`, or `None` if it would go negative.
    #[must_use]
    pub fn debited(&self, amount: Amount) -> Option<Amount> {
        self.is_balance_sufficient(amount).then(|| self.balance - amount)
    }
}
