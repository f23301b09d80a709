//! Monetary types for stake and odds representation.

use rust_decimal::Decimal;

/// Stake, balance and payout amounts.
pub type Amount = Decimal;

/// Decimal odds of a single selection.
pub type Odds = Decimal;
