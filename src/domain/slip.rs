//! Bet slips as submitted by callers and as accepted for settlement.
//!
//! [`SlipRequest`] mirrors the wire shape: every field is optional so that a
//! structurally incomplete slip can still be represented and reported as a
//! mismatch. [`BetSlip`] is the complete form the ledger works with.

use serde::{Deserialize, Serialize};

use super::id::{PlayerId, SelectionId};
use super::money::{Amount, Odds};
use crate::error::Result;

/// One leg of a submitted slip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRequest {
    #[serde(default)]
    pub id: Option<SelectionId>,
    #[serde(default)]
    pub odds: Option<Odds>,
}

/// A bet slip exactly as received from the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlipRequest {
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub stake_amount: Option<Amount>,
    #[serde(default)]
    pub selections: Option<Vec<SelectionRequest>>,
}

impl SlipRequest {
    /// Build a fully populated request.
    pub fn new(
        player_id: PlayerId,
        stake_amount: Amount,
        selections: impl IntoIterator<Item = (SelectionId, Odds)>,
    ) -> Self {
        Self {
            player_id: Some(player_id),
            stake_amount: Some(stake_amount),
            selections: Some(
                selections
                    .into_iter()
                    .map(|(id, odds)| SelectionRequest {
                        id: Some(id),
                        odds: Some(odds),
                    })
                    .collect(),
            ),
        }
    }

    /// Parse a request from its JSON body.
    ///
    /// # Errors
    /// Returns an error if the body is not JSON or a field has the wrong type.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Return the complete slip, or `None` if any required field is missing.
    #[must_use]
    pub fn to_slip(&self) -> Option<BetSlip> {
        let selections = self
            .selections
            .as_ref()?
            .iter()
            .map(|s| {
                Some(SlipSelection {
                    id: s.id?,
                    odds: s.odds?,
                })
            })
            .collect::<Option<Vec<_>>>()?;

        Some(BetSlip {
            player_id: self.player_id?,
            stake_amount: self.stake_amount?,
            selections,
        })
    }
}

/// A leg of a structurally complete slip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlipSelection {
    pub id: SelectionId,
    pub odds: Odds,
}

/// A structurally complete slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BetSlip {
    pub player_id: PlayerId,
    pub stake_amount: Amount,
    pub selections: Vec<SlipSelection>,
}
