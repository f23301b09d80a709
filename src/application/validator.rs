//! Slip validation.
//!
//! Runs the structural pre-check, then every rule of the [`RuleSet`], and
//! renders all violations through the [`ErrorCatalog`]. Validation never
//! writes; the only I/O is the player lookup.

use tracing::{debug, warn};

use crate::domain::rules::{Scope, Violation};
use crate::domain::{BetLimits, BetSlip, ErrorCatalog, RuleSet, SlipRequest, ViolationKind};
use crate::port::inbound::betting::ValidationResult;
use crate::port::outbound::store::PlayerLookup;

/// Validates submitted slips against the configured limits.
pub struct Validator {
    rules: RuleSet,
    catalog: &'static ErrorCatalog,
}

impl Validator {
    #[must_use]
    pub const fn new(limits: BetLimits, catalog: &'static ErrorCatalog) -> Self {
        Self {
            rules: RuleSet::new(limits),
            catalog,
        }
    }

    /// Validate `request`, reporting every violation.
    ///
    /// An empty result means the slip may be settled.
    pub fn validate<L>(&self, request: &SlipRequest, lookup: &L) -> ValidationResult
    where
        L: PlayerLookup + ?Sized,
    {
        match self.check(request, lookup) {
            Ok(_) => ValidationResult::default(),
            Err(result) => result,
        }
    }

    /// Validate `request` and return the complete slip if it passes.
    ///
    /// # Errors
    /// Returns the full [`ValidationResult`] when any check fails. A slip with
    /// missing fields yields a single mismatch error and no rule is run.
    pub fn check<L>(&self, request: &SlipRequest, lookup: &L) -> Result<BetSlip, ValidationResult>
    where
        L: PlayerLookup + ?Sized,
    {
        let Some(slip) = request.to_slip() else {
            debug!("Slip structure mismatch");
            return Err(self.single(ViolationKind::Mismatch));
        };

        let player = lookup.find_player(slip.player_id).map_err(|e| {
            warn!(player_id = %slip.player_id, error = %e, "Player lookup failed");
            self.single(ViolationKind::Unknown)
        })?;

        let violations = self.rules.evaluate(&slip, player.as_ref());
        if violations.is_empty() {
            return Ok(slip);
        }

        debug!(
            player_id = %slip.player_id,
            count = violations.len(),
            "Slip violates rules"
        );
        Err(self.report(&violations))
    }

    /// A result carrying one slip-level error of `kind`.
    #[must_use]
    pub fn single(&self, kind: ViolationKind) -> ValidationResult {
        ValidationResult::single(self.catalog.render(kind, None))
    }

    fn report(&self, violations: &[Violation]) -> ValidationResult {
        let mut result = ValidationResult::default();
        for violation in violations {
            let error = self.catalog.render(violation.kind, violation.threshold);
            match violation.scope {
                Scope::Slip => result.push_global(error),
                Scope::Selection(id) => result.push_selection(id, error),
            }
        }
        result
    }
}
