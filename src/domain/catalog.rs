//! Error catalog: the single source of numeric codes and message templates.
//!
//! The catalog is built once per process and only ever handed out by shared
//! reference. Codes are part of the public contract; callers branch on the
//! code and show the message.

use std::sync::OnceLock;

use rust_decimal::Decimal;
use serde::Serialize;

use super::violation::ViolationKind;

/// Numeric code and message template of one violation kind.
///
/// A template holds at most one `{}` placeholder, filled with the threshold
/// that was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub code: u16,
    pub template: &'static str,
}

/// A rendered error as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    pub code: u16,
    pub message: String,
}

/// Immutable mapping from [`ViolationKind`] to [`CatalogEntry`].
#[derive(Debug)]
pub struct ErrorCatalog {
    entries: [CatalogEntry; 12],
}

static GLOBAL: OnceLock<ErrorCatalog> = OnceLock::new();

const fn entry(code: u16, template: &'static str) -> CatalogEntry {
    CatalogEntry { code, template }
}

impl ErrorCatalog {
    /// Build the standard catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            entries: [
                entry(0, "Unknown error"),
                entry(1, "Betslip structure mismatch"),
                entry(2, "Minimum stake amount is {}"),
                entry(3, "Maximum stake amount is {}"),
                entry(4, "Minimum number of selections is {}"),
                entry(5, "Maximum number of selections is {}"),
                entry(6, "Minimum odds are {}"),
                entry(7, "Maximum odds are {}"),
                entry(8, "Duplicate selection found"),
                entry(9, "Maximum win amount is {}"),
                entry(10, "Your previous action is not finished yet"),
                entry(11, "Insufficient balance"),
            ],
        }
    }

    /// Process-wide catalog, initialized on first use.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::standard)
    }

    #[must_use]
    pub fn entry(&self, kind: ViolationKind) -> &CatalogEntry {
        &self.entries[kind.index()]
    }

    #[must_use]
    pub fn code(&self, kind: ViolationKind) -> u16 {
        self.entry(kind).code
    }

    /// Render the caller-facing error for `kind`.
    ///
    /// `threshold` fills the template placeholder when both are present.
    #[must_use]
    pub fn render(&self, kind: ViolationKind, threshold: Option<Decimal>) -> ErrorEntry {
        let entry = self.entry(kind);
        let message = match threshold {
            Some(value) if entry.template.contains("{}") => entry
                .template
                .replacen("{}", &value.normalize().to_string(), 1),
            _ => entry.template.replace(" {}", ""),
        };
        ErrorEntry {
            code: entry.code,
            message,
        }
    }

    /// Iterate over every kind with its entry, in code order.
    pub fn iter(&self) -> impl Iterator<Item = (ViolationKind, &CatalogEntry)> {
        ViolationKind::ALL.into_iter().zip(self.entries.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn codes_match_declaration_order() {
        let catalog = ErrorCatalog::standard();
        for (kind, entry) in catalog.iter() {
            assert_eq!(usize::from(entry.code), kind.index());
        }
    }

    #[test]
    fn well_known_codes() {
        let catalog = ErrorCatalog::global();
        assert_eq!(catalog.code(ViolationKind::Unknown), 0);
        assert_eq!(catalog.code(ViolationKind::Mismatch), 1);
        assert_eq!(catalog.code(ViolationKind::StakeAmountMax), 3);
        assert_eq!(catalog.code(ViolationKind::MaxWinAmount), 9);
        assert_eq!(catalog.code(ViolationKind::PreviousAction), 10);
        assert_eq!(catalog.code(ViolationKind::BalanceInsufficient), 11);
    }

    #[test]
    fn render_fills_threshold() {
        let catalog = ErrorCatalog::global();
        let error = catalog.render(ViolationKind::StakeAmountMin, Some(dec!(0.30)));
        assert_eq!(error.code, 2);
        assert_eq!(error.message, "Minimum stake amount is 0.3");

        let error = catalog.render(ViolationKind::MaxWinAmount, Some(dec!(20000)));
        assert_eq!(error.message, "Maximum win amount is 20000");
    }

    #[test]
    fn render_without_placeholder_ignores_threshold() {
        let catalog = ErrorCatalog::global();
        let error = catalog.render(ViolationKind::SelectionDistinct, Some(dec!(5)));
        assert_eq!(error.message, "Duplicate selection found");
    }

    #[test]
    fn render_without_threshold_drops_placeholder() {
        let catalog = ErrorCatalog::global();
        let error = catalog.render(ViolationKind::SelectionsMax, None);
        assert_eq!(error.message, "Maximum number of selections is");
    }

    #[test]
    fn global_is_shared() {
        assert!(std::ptr::eq(ErrorCatalog::global(), ErrorCatalog::global()));
    }
}
