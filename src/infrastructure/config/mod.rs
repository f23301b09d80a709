//! Infrastructure configuration modules.

pub mod ledger;
pub mod limits;
pub mod logging;
pub mod settings;

pub use settings::Config;
