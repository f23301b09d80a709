//! Domain identifier types with proper encapsulation.
//!
//! All identifiers are integer row keys. Players and selections are keyed by
//! the caller; bets and balance transactions are assigned by the store.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying value.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self::new(id)
            }
        }
    };
}

row_id!(
    /// Player identifier, supplied by the caller on every slip.
    PlayerId
);

row_id!(
    /// External market-selection identifier referenced by a bet leg.
    SelectionId
);

row_id!(
    /// Bet identifier assigned when the bet row is created.
    BetId
);

row_id!(
    /// Balance transaction identifier assigned on append.
    TransactionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_id_new_and_value() {
        let id = PlayerId::new(42);
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn selection_id_display() {
        let id = SelectionId::new(123);
        assert_eq!(format!("{}", id), "123");
    }

    #[test]
    fn ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&BetId::new(9)).unwrap();
        assert_eq!(json, "9");

        let parsed: SelectionId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, SelectionId::from(42));
    }
}
