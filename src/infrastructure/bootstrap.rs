//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::sqlite::SqliteLedgerStore;
use crate::application::{BetService, LedgerSettings};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Open the configured database and build the bet service over it.
///
/// # Errors
/// Returns an error if the database cannot be opened or migrated.
pub fn build_service(config: &Config) -> Result<BetService<SqliteLedgerStore>> {
    let store = SqliteLedgerStore::open(&config.database, config.ledger.busy_timeout_ms)?;
    info!(database = %config.database, "Ledger store opened");

    Ok(BetService::new(
        Arc::new(store),
        config.limits.clone().into(),
        LedgerSettings::from(&config.ledger),
    ))
}
