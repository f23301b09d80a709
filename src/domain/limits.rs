//! Business thresholds applied to every slip.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Thresholds enforced by the rule set.
///
/// `default_balance` doubles as the starting balance of auto-created players
/// and as an absolute ceiling on any single stake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetLimits {
    pub stake_min: Decimal,
    pub stake_max: Decimal,
    pub selections_min: usize,
    pub selections_max: usize,
    pub odds_min: Decimal,
    pub odds_max: Decimal,
    pub max_win: Decimal,
    pub default_balance: Decimal,
}

impl Default for BetLimits {
    fn default() -> Self {
        Self {
            stake_min: dec!(0.3),
            stake_max: dec!(10000),
            selections_min: 1,
            selections_max: 20,
            odds_min: dec!(1),
            odds_max: dec!(10000),
            max_win: dec!(20000),
            default_balance: dec!(1000),
        }
    }
}
