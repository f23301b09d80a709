//! Inbound (driving) ports consumed by inbound adapters.
//!
//! - [`betting`]: validation results and the submission response contract

pub mod betting;
