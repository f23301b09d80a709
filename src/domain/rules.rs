//! Slip validation rules.
//!
//! Every rule is a pure function of the slip, the player's current state and
//! the configured [`BetLimits`]. [`RuleSet::evaluate`] runs all of them and
//! returns every violation; nothing here short-circuits.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::id::SelectionId;
use super::limits::BetLimits;
use super::money::Amount;
use super::player::Player;
use super::slip::{BetSlip, SlipSelection};
use super::violation::ViolationKind;

/// What a violation is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Slip,
    Selection(SelectionId),
}

/// A single failed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub scope: Scope,
    /// Threshold that was crossed, shown in the rendered message.
    pub threshold: Option<Decimal>,
}

impl Violation {
    const fn slip(kind: ViolationKind, threshold: Option<Decimal>) -> Self {
        Self {
            kind,
            scope: Scope::Slip,
            threshold,
        }
    }

    const fn selection(kind: ViolationKind, id: SelectionId, threshold: Option<Decimal>) -> Self {
        Self {
            kind,
            scope: Scope::Selection(id),
            threshold,
        }
    }
}

/// The validation rules bound to a set of limits.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    limits: BetLimits,
}

impl RuleSet {
    #[must_use]
    pub const fn new(limits: BetLimits) -> Self {
        Self { limits }
    }

    /// Run every rule against `slip`.
    ///
    /// `player` is `None` for a player with no record yet.
    #[must_use]
    pub fn evaluate(&self, slip: &BetSlip, player: Option<&Player>) -> Vec<Violation> {
        let stake = slip.stake_amount;
        let mut violations = Vec::new();

        violations.extend(self.stake_min(stake));
        violations.extend(self.stake_max(stake));
        violations.extend(self.selections_min(&slip.selections));
        violations.extend(self.selections_max(&slip.selections));
        violations.extend(self.odds_bounds(&slip.selections));
        violations.extend(Self::distinct_selections(&slip.selections));
        violations.extend(self.max_win(stake, &slip.selections));
        violations.extend(self.balance_sufficient(stake, player));

        violations
    }

    pub fn stake_min(&self, stake: Amount) -> Option<Violation> {
        (stake < self.limits.stake_min).then(|| {
            Violation::slip(ViolationKind::StakeAmountMin, Some(self.limits.stake_min))
        })
    }

    pub fn stake_max(&self, stake: Amount) -> Option<Violation> {
        (stake > self.limits.stake_max).then(|| {
            Violation::slip(ViolationKind::StakeAmountMax, Some(self.limits.stake_max))
        })
    }

    pub fn selections_min(&self, selections: &[SlipSelection]) -> Option<Violation> {
        (selections.len() < self.limits.selections_min).then(|| {
            Violation::slip(
                ViolationKind::SelectionsMin,
                Some(Decimal::from(self.limits.selections_min)),
            )
        })
    }

    pub fn selections_max(&self, selections: &[SlipSelection]) -> Option<Violation> {
        (selections.len() > self.limits.selections_max).then(|| {
            Violation::slip(
                ViolationKind::SelectionsMax,
                Some(Decimal::from(self.limits.selections_max)),
            )
        })
    }

    /// Odds bounds, one violation per offending selection in slip order.
    pub fn odds_bounds(&self, selections: &[SlipSelection]) -> Vec<Violation> {
        selections
            .iter()
            .filter_map(|s| {
                if s.odds < self.limits.odds_min {
                    Some(Violation::selection(
                        ViolationKind::SelectionOddsMin,
                        s.id,
                        Some(self.limits.odds_min),
                    ))
                } else if s.odds > self.limits.odds_max {
                    Some(Violation::selection(
                        ViolationKind::SelectionOddsMax,
                        s.id,
                        Some(self.limits.odds_max),
                    ))
                } else {
                    None
                }
            })
            .collect()
    }

    /// One violation per selection id that occurs more than once, in order of
    /// first appearance.
    pub fn distinct_selections(selections: &[SlipSelection]) -> Vec<Violation> {
        let mut counts: HashMap<SelectionId, usize> = HashMap::new();
        for s in selections {
            *counts.entry(s.id).or_default() += 1;
        }

        let mut reported = Vec::new();
        for s in selections {
            if counts.get(&s.id).copied().unwrap_or_default() > 1 && !reported.contains(&s.id) {
                reported.push(s.id);
            }
        }

        reported
            .into_iter()
            .map(|id| Violation::selection(ViolationKind::SelectionDistinct, id, None))
            .collect()
    }

    /// Stake multiplied by the product of all odds.
    ///
    /// Returns `None` if the product overflows the decimal range.
    #[must_use]
    pub fn potential_win(stake: Amount, selections: &[SlipSelection]) -> Option<Amount> {
        selections
            .iter()
            .try_fold(stake, |acc, s| acc.checked_mul(s.odds))
    }

    pub fn max_win(&self, stake: Amount, selections: &[SlipSelection]) -> Option<Violation> {
        let exceeded = Self::potential_win(stake, selections)
            .map_or(true, |win| win > self.limits.max_win);
        exceeded.then(|| Violation::slip(ViolationKind::MaxWinAmount, Some(self.limits.max_win)))
    }

    /// A known player must cover the stake, and no stake may exceed the
    /// default starting balance, whatever the player's actual balance.
    pub fn balance_sufficient(&self, stake: Amount, player: Option<&Player>) -> Option<Violation> {
        let short = player.is_some_and(|p| !p.is_balance_sufficient(stake));
        let over_ceiling = stake > self.limits.default_balance;
        (short || over_ceiling).then(|| Violation::slip(ViolationKind::BalanceInsufficient, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::PlayerId;
    use rust_decimal_macros::dec;

    fn leg(id: i64, odds: Decimal) -> SlipSelection {
        SlipSelection {
            id: SelectionId::new(id),
            odds,
        }
    }

    fn slip(stake: Decimal, selections: Vec<SlipSelection>) -> BetSlip {
        BetSlip {
            player_id: PlayerId::new(1),
            stake_amount: stake,
            selections,
        }
    }

    fn kinds(violations: &[Violation]) -> Vec<ViolationKind> {
        violations.iter().map(|v| v.kind).collect()
    }

    #[test]
    fn valid_slip_has_no_violations() {
        let rules = RuleSet::default();
        let slip = slip(dec!(10), vec![leg(1, dec!(1.5)), leg(2, dec!(2))]);
        assert!(rules.evaluate(&slip, None).is_empty());
    }

    #[test]
    fn stake_bounds_are_inclusive() {
        let rules = RuleSet::default();
        assert!(rules.stake_min(dec!(0.3)).is_none());
        assert!(rules.stake_min(dec!(0.29)).is_some());
        assert!(rules.stake_max(dec!(10000)).is_none());
        assert!(rules.stake_max(dec!(10000.01)).is_some());
    }

    #[test]
    fn odds_bounds_are_inclusive() {
        let rules = RuleSet::default();
        assert!(rules.odds_bounds(&[leg(1, dec!(1)), leg(2, dec!(10000))]).is_empty());

        let violations = rules.odds_bounds(&[leg(1, dec!(0.9999)), leg(2, dec!(10000.0001))]);
        assert_eq!(
            kinds(&violations),
            vec![
                ViolationKind::SelectionOddsMin,
                ViolationKind::SelectionOddsMax
            ]
        );
    }

    #[test]
    fn selection_count_bounds() {
        let rules = RuleSet::default();
        assert!(rules.selections_min(&[]).is_some());

        let twenty: Vec<_> = (1..=20).map(|i| leg(i, dec!(1))).collect();
        assert!(rules.selections_max(&twenty).is_none());

        let twenty_one: Vec<_> = (1..=21).map(|i| leg(i, dec!(1))).collect();
        let violation = rules.selections_max(&twenty_one).unwrap();
        assert_eq!(violation.threshold, Some(dec!(20)));
    }

    #[test]
    fn odds_bounds_attach_to_selection() {
        let rules = RuleSet::default();
        let violations =
            rules.odds_bounds(&[leg(1, dec!(0.99)), leg(2, dec!(5)), leg(3, dec!(10001))]);

        assert_eq!(
            kinds(&violations),
            vec![
                ViolationKind::SelectionOddsMin,
                ViolationKind::SelectionOddsMax
            ]
        );
        assert_eq!(violations[0].scope, Scope::Selection(SelectionId::new(1)));
        assert_eq!(violations[1].scope, Scope::Selection(SelectionId::new(3)));
    }

    #[test]
    fn duplicate_ids_reported_once_per_id() {
        let violations = RuleSet::distinct_selections(&[
            leg(42, dec!(1.5)),
            leg(7, dec!(2)),
            leg(42, dec!(3)),
            leg(42, dec!(4)),
        ]);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::SelectionDistinct);
        assert_eq!(violations[0].scope, Scope::Selection(SelectionId::new(42)));
    }

    #[test]
    fn max_win_uses_product_of_odds() {
        let rules = RuleSet::default();
        assert!(rules.max_win(dec!(100), &[leg(1, dec!(200))]).is_none());
        assert!(rules.max_win(dec!(100), &[leg(1, dec!(250))]).is_some());
        assert!(rules
            .max_win(dec!(10), &[leg(1, dec!(40)), leg(2, dec!(50))])
            .is_none());
        assert!(rules
            .max_win(dec!(10), &[leg(1, dec!(40)), leg(2, dec!(50.01))])
            .is_some());
    }

    #[test]
    fn overflowing_product_exceeds_cap() {
        let rules = RuleSet::default();
        let legs: Vec<_> = (1..=20).map(|i| leg(i, dec!(10000))).collect();
        assert_eq!(RuleSet::potential_win(dec!(1), &legs), None);
        assert!(rules.max_win(dec!(1), &legs).is_some());
    }

    #[test]
    fn balance_rule_checks_known_player() {
        let rules = RuleSet::default();
        let poor = Player::new(PlayerId::new(1), dec!(5), 0);
        assert!(rules.balance_sufficient(dec!(6), Some(&poor)).is_some());
        assert!(rules.balance_sufficient(dec!(5), Some(&poor)).is_none());
        assert!(rules.balance_sufficient(dec!(6), None).is_none());
    }

    #[test]
    fn stake_above_default_balance_is_refused_even_for_rich_player() {
        let rules = RuleSet::default();
        let rich = Player::new(PlayerId::new(1), dec!(50000), 0);
        assert!(rules.balance_sufficient(dec!(1000), Some(&rich)).is_none());
        assert!(rules.balance_sufficient(dec!(1000.01), Some(&rich)).is_some());
    }

    #[test]
    fn all_violations_are_collected() {
        let rules = RuleSet::default();
        let slip = slip(dec!(0.1), vec![leg(5, dec!(0.5)), leg(5, dec!(1))]);
        let found = kinds(&rules.evaluate(&slip, None));

        assert_eq!(
            found,
            vec![
                ViolationKind::StakeAmountMin,
                ViolationKind::SelectionOddsMin,
                ViolationKind::SelectionDistinct,
            ]
        );
    }
}
