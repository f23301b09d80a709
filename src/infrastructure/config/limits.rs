//! Bet limit configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::BetLimits;

/// Thresholds applied to every slip.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_stake_min")]
    pub stake_min: Decimal,
    #[serde(default = "default_stake_max")]
    pub stake_max: Decimal,
    #[serde(default = "default_selections_min")]
    pub selections_min: usize,
    #[serde(default = "default_selections_max")]
    pub selections_max: usize,
    #[serde(default = "default_odds_min")]
    pub odds_min: Decimal,
    #[serde(default = "default_odds_max")]
    pub odds_max: Decimal,
    /// Ceiling on stake times combined odds.
    #[serde(default = "default_max_win")]
    pub max_win: Decimal,
    /// Starting balance of players created on their first bet.
    #[serde(default = "default_balance")]
    pub default_balance: Decimal,
}

// Field defaults are read from `BetLimits::default()`.

fn default_stake_min() -> Decimal {
    BetLimits::default().stake_min
}

fn default_stake_max() -> Decimal {
    BetLimits::default().stake_max
}

fn default_selections_min() -> usize {
    BetLimits::default().selections_min
}

fn default_selections_max() -> usize {
    BetLimits::default().selections_max
}

fn default_odds_min() -> Decimal {
    BetLimits::default().odds_min
}

fn default_odds_max() -> Decimal {
    BetLimits::default().odds_max
}

fn default_max_win() -> Decimal {
    BetLimits::default().max_win
}

fn default_balance() -> Decimal {
    BetLimits::default().default_balance
}

impl Default for LimitsConfig {
    fn default() -> Self {
        BetLimits::default().into()
    }
}

impl From<BetLimits> for LimitsConfig {
    fn from(limits: BetLimits) -> Self {
        Self {
            stake_min: limits.stake_min,
            stake_max: limits.stake_max,
            selections_min: limits.selections_min,
            selections_max: limits.selections_max,
            odds_min: limits.odds_min,
            odds_max: limits.odds_max,
            max_win: limits.max_win,
            default_balance: limits.default_balance,
        }
    }
}

impl From<LimitsConfig> for BetLimits {
    fn from(config: LimitsConfig) -> Self {
        Self {
            stake_min: config.stake_min,
            stake_max: config.stake_max,
            selections_min: config.selections_min,
            selections_max: config.selections_max,
            odds_min: config.odds_min,
            odds_max: config.odds_max,
            max_win: config.max_win,
            default_balance: config.default_balance,
        }
    }
}
