use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::id::PlayerId;
use crate::domain::violation::ViolationKind;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Settlement errors raised inside (or around) the ledger transaction.
///
/// Every variant aborts the transaction; none of them leaves partial state.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("insufficient balance for player {player_id}: {balance} < {stake}")]
    InsufficientBalance {
        player_id: PlayerId,
        balance: Decimal,
        stake: Decimal,
    },

    #[error("balance of player {player_id} changed concurrently")]
    Conflict { player_id: PlayerId },

    #[error("timed out waiting for settlement lock of player {player_id}")]
    LockTimeout { player_id: PlayerId },

    #[error("settlement for player {player_id} still conflicting after {attempts} attempts")]
    RetriesExhausted { player_id: PlayerId, attempts: u32 },

    #[error(transparent)]
    Store(#[from] Error),
}

impl LedgerError {
    /// Catalog entry reported to the caller for this failure.
    #[must_use]
    pub const fn violation_kind(&self) -> ViolationKind {
        match self {
            Self::InsufficientBalance { .. } => ViolationKind::BalanceInsufficient,
            Self::Conflict { .. } | Self::LockTimeout { .. } | Self::RetriesExhausted { .. } => {
                ViolationKind::PreviousAction
            }
            Self::Store(_) => ViolationKind::Unknown,
        }
    }
}

impl From<diesel::result::Error> for LedgerError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Store(Error::Database(err.to_string()))
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ledger_errors_map_to_catalog_kinds() {
        let player_id = PlayerId::new(7);
        let insufficient = LedgerError::InsufficientBalance {
            player_id,
            balance: dec!(10),
            stake: dec!(20),
        };
        assert_eq!(
            insufficient.violation_kind(),
            ViolationKind::BalanceInsufficient
        );
        assert_eq!(
            LedgerError::LockTimeout { player_id }.violation_kind(),
            ViolationKind::PreviousAction
        );
        assert_eq!(
            LedgerError::RetriesExhausted {
                player_id,
                attempts: 4
            }
            .violation_kind(),
            ViolationKind::PreviousAction
        );
        assert_eq!(
            LedgerError::from(Error::Database("disk full".into())).violation_kind(),
            ViolationKind::Unknown
        );
    }

    #[test]
    fn diesel_errors_become_store_failures() {
        let err = LedgerError::from(diesel::result::Error::NotFound);
        assert!(matches!(err, LedgerError::Store(Error::Database(_))));
    }
}
