//! Bet submission contract.
//!
//! A rejected slip serializes to
//! `{"errors": [{"code", "message"}], "selections": [{"id", "errors": [...]}]}`;
//! an accepted slip has no body.

use serde::Serialize;

use crate::domain::{ErrorEntry, SelectionId, Settlement};

/// Errors attached to one selection of the slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionErrors {
    #[serde(rename = "id")]
    pub selection_id: SelectionId,
    pub errors: Vec<ErrorEntry>,
}

/// Outcome of validating a slip, partitioned into slip-level and
/// per-selection errors. Empty on both sides means the slip is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    #[serde(rename = "errors")]
    pub global_errors: Vec<ErrorEntry>,
    #[serde(rename = "selections")]
    pub selection_errors: Vec<SelectionErrors>,
}

impl ValidationResult {
    /// A result carrying exactly one slip-level error.
    #[must_use]
    pub fn single(error: ErrorEntry) -> Self {
        Self {
            global_errors: vec![error],
            selection_errors: Vec::new(),
        }
    }

    /// Return `true` if no error of any kind was recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.global_errors.is_empty() && self.selection_errors.is_empty()
    }

    pub fn push_global(&mut self, error: ErrorEntry) {
        self.global_errors.push(error);
    }

    /// Attach `error` to `selection_id`, keeping one entry per selection in
    /// order of first report and each code at most once per selection.
    pub fn push_selection(&mut self, selection_id: SelectionId, error: ErrorEntry) {
        match self
            .selection_errors
            .iter_mut()
            .find(|entry| entry.selection_id == selection_id)
        {
            Some(entry) => {
                if !entry.errors.iter().any(|e| e.code == error.code) {
                    entry.errors.push(error);
                }
            }
            None => self.selection_errors.push(SelectionErrors {
                selection_id,
                errors: vec![error],
            }),
        }
    }

    /// Every reported code, slip-level first, then per selection.
    #[must_use]
    pub fn codes(&self) -> Vec<u16> {
        self.global_errors
            .iter()
            .chain(self.selection_errors.iter().flat_map(|s| s.errors.iter()))
            .map(|e| e.code)
            .collect()
    }

    #[must_use]
    pub fn has_code(&self, code: u16) -> bool {
        self.codes().contains(&code)
    }

    /// Codes reported against one selection.
    #[must_use]
    pub fn selection_codes(&self, selection_id: SelectionId) -> Vec<u16> {
        self.selection_errors
            .iter()
            .filter(|s| s.selection_id == selection_id)
            .flat_map(|s| s.errors.iter().map(|e| e.code))
            .collect()
    }
}

/// Caller-facing response of a bet submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BetResponse {
    Accepted(Settlement),
    Rejected(ValidationResult),
}

impl BetResponse {
    /// HTTP status the response maps to: 201 Created or 422 Unprocessable Entity.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Accepted(_) => 201,
            Self::Rejected(_) => 422,
        }
    }

    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Response body; `None` for an accepted bet.
    #[must_use]
    pub fn body(&self) -> Option<serde_json::Value> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(result) => Some(serde_json::json!(result)),
        }
    }
}

impl From<Result<Settlement, ValidationResult>> for BetResponse {
    fn from(result: Result<Settlement, ValidationResult>) -> Self {
        match result {
            Ok(settlement) => Self::Accepted(settlement),
            Err(errors) => Self::Rejected(errors),
        }
    }
}
