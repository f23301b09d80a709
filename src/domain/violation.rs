//! Named categories of slip rejection.

use std::fmt;

use serde::Serialize;

/// Every reason a slip can be rejected, structural, policy, concurrency or system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Unknown,
    Mismatch,
    StakeAmountMin,
    StakeAmountMax,
    SelectionsMin,
    SelectionsMax,
    SelectionOddsMin,
    SelectionOddsMax,
    SelectionDistinct,
    MaxWinAmount,
    PreviousAction,
    BalanceInsufficient,
}

impl ViolationKind {
    /// All kinds in code order.
    pub const ALL: [Self; 12] = [
        Self::Unknown,
        Self::Mismatch,
        Self::StakeAmountMin,
        Self::StakeAmountMax,
        Self::SelectionsMin,
        Self::SelectionsMax,
        Self::SelectionOddsMin,
        Self::SelectionOddsMax,
        Self::SelectionDistinct,
        Self::MaxWinAmount,
        Self::PreviousAction,
        Self::BalanceInsufficient,
    ];

    /// Stable name used in logs and in the catalog listing.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Mismatch => "mismatch",
            Self::StakeAmountMin => "stake_amount_min",
            Self::StakeAmountMax => "stake_amount_max",
            Self::SelectionsMin => "selections_min",
            Self::SelectionsMax => "selections_max",
            Self::SelectionOddsMin => "selection_odds_min",
            Self::SelectionOddsMax => "selection_odds_max",
            Self::SelectionDistinct => "selection_distinct",
            Self::MaxWinAmount => "max_win_amount",
            Self::PreviousAction => "previous_action",
            Self::BalanceInsufficient => "balance_insufficient",
        }
    }

    /// Position of this kind in [`ViolationKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
