use betslip::domain::{PlayerId, SelectionId, SlipRequest};
use rust_decimal::Decimal;

/// Build a complete slip from `(selection_id, odds)` legs.
pub fn slip(player: i64, stake: Decimal, legs: &[(i64, Decimal)]) -> SlipRequest {
    SlipRequest::new(
        PlayerId::new(player),
        stake,
        legs.iter().map(|&(id, odds)| (SelectionId::new(id), odds)),
    )
}

/// `count` distinct legs, all at `odds`.
pub fn legs(count: usize, odds: Decimal) -> Vec<(i64, Decimal)> {
    (1..=count as i64).map(|id| (id, odds)).collect()
}
