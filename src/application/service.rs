//! Bet submission use case.
//!
//! Validates a slip and, if it passes, settles it. Ledger failures are
//! reported through the same error catalog as rule violations.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::ledger::{LedgerEngine, LedgerSettings};
use super::validator::Validator;
use crate::domain::{
    BalanceTransaction, Bet, BetId, BetLimits, ErrorCatalog, Player, PlayerId, Settlement,
    SlipRequest, ViolationKind,
};
use crate::error::{LedgerError, Result};
use crate::port::inbound::betting::{BetResponse, ValidationResult};
use crate::port::outbound::store::LedgerStore;

/// Entry point for submitting bets against one store.
pub struct BetService<S> {
    store: Arc<S>,
    validator: Validator,
    ledger: LedgerEngine<S>,
}

impl<S: LedgerStore> BetService<S> {
    pub fn new(store: Arc<S>, limits: BetLimits, settings: LedgerSettings) -> Self {
        let ledger = LedgerEngine::new(Arc::clone(&store), limits.default_balance, settings);
        Self {
            store,
            validator: Validator::new(limits, ErrorCatalog::global()),
            ledger,
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Validate without settling.
    pub fn validate(&self, request: &SlipRequest) -> ValidationResult {
        self.validator.validate(request, self.store.as_ref())
    }

    /// Validate `request` and settle it.
    ///
    /// # Errors
    /// Returns the rule violations, or a single catalog error when the
    /// settlement itself fails. Nothing is persisted in either case.
    pub fn submit_bet(&self, request: &SlipRequest) -> std::result::Result<Settlement, ValidationResult> {
        let slip = self.validator.check(request, self.store.as_ref())?;

        self.ledger.settle(&slip).map_err(|e| {
            match &e {
                LedgerError::Store(inner) => {
                    error!(player_id = %slip.player_id, error = %inner, "Settlement failed");
                }
                other => warn!(player_id = %slip.player_id, reason = %other, "Settlement rejected"),
            }
            self.validator.single(e.violation_kind())
        })
    }

    /// Submit a JSON slip body.
    ///
    /// A body that does not parse is a structure mismatch.
    pub fn submit_json(&self, body: &str) -> BetResponse {
        let request = match SlipRequest::from_json(body) {
            Ok(request) => request,
            Err(e) => {
                info!(error = %e, "Unparseable slip body");
                return BetResponse::Rejected(self.validator.single(ViolationKind::Mismatch));
            }
        };
        self.submit_bet(&request).into()
    }

    /// Current state of a player, if the player has ever bet.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn balance(&self, player_id: PlayerId) -> Result<Option<Player>> {
        self.store.find_player(player_id)
    }

    /// A player's balance transactions, oldest first.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn history(&self, player_id: PlayerId) -> Result<Vec<BalanceTransaction>> {
        self.store.player_transactions(player_id)
    }

    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn bet(&self, bet_id: BetId) -> Result<Option<Bet>> {
        self.store.find_bet(bet_id)
    }
}
