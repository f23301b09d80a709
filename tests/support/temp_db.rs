use std::path::{Path, PathBuf};
use std::sync::Arc;

use betslip::adapter::outbound::sqlite::SqliteLedgerStore;
use betslip::application::{BetService, LedgerSettings};
use betslip::domain::BetLimits;
use tempfile::TempDir;

/// Temporary SQLite database for integration tests.
///
/// The directory, and the database in it, is removed on drop.
pub struct TempDb {
    dir: TempDir,
    path: PathBuf,
}

impl TempDb {
    pub fn create() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("betslip.db");
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Open a fresh store over this database.
    pub fn store(&self) -> SqliteLedgerStore {
        SqliteLedgerStore::open(&self.url(), 5000).expect("open sqlite store")
    }

    /// Service with default limits and settings.
    pub fn service(&self) -> BetService<SqliteLedgerStore> {
        self.service_with(LedgerSettings::default())
    }

    pub fn service_with(&self, settings: LedgerSettings) -> BetService<SqliteLedgerStore> {
        BetService::new(Arc::new(self.store()), BetLimits::default(), settings)
    }
}
