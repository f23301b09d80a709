//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the database path can be
//! overridden with the `BETSLIP_DATABASE` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use betslip::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::ledger::LedgerConfig;
use super::limits::LimitsConfig;
use super::logging::LoggingConfig;
use crate::error::{ConfigError, Result};

/// Environment variable overriding [`Config::database`].
pub const DATABASE_ENV: &str = "BETSLIP_DATABASE";

/// Config file read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Path to SQLite database file.
    ///
    /// Defaults to "betslip.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Thresholds applied to every slip.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Settlement locking and retry behavior.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

fn default_database_path() -> String {
    "betslip.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            logging: LoggingConfig::default(),
            limits: LimitsConfig::default(),
            ledger: LedgerConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., a minimum above its maximum)
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if given, else `config.toml` if present, else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be read, or if the
    /// loaded configuration is invalid.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => {
                let mut config = Self::default();
                config.apply_env();
                config.validate()?;
                Ok(config)
            }
        }
    }

    fn apply_env(&mut self) {
        if let Ok(database) = std::env::var(DATABASE_ENV) {
            if !database.is_empty() {
                self.database = database;
            }
        }
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    fn validate(&self) -> Result<()> {
        if self.database.is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }

        let limits = &self.limits;
        if limits.stake_min <= Decimal::ZERO {
            return Err(invalid("stake_min", "must be greater than 0"));
        }
        if limits.stake_max < limits.stake_min {
            return Err(invalid("stake_max", "must be >= stake_min"));
        }
        if limits.selections_min == 0 {
            return Err(invalid("selections_min", "must be at least 1"));
        }
        if limits.selections_max < limits.selections_min {
            return Err(invalid("selections_max", "must be >= selections_min"));
        }
        if limits.odds_min < Decimal::ONE {
            return Err(invalid("odds_min", "must be at least 1"));
        }
        if limits.odds_max < limits.odds_min {
            return Err(invalid("odds_max", "must be >= odds_min"));
        }
        if limits.max_win <= Decimal::ZERO {
            return Err(invalid("max_win", "must be greater than 0"));
        }
        if limits.default_balance < Decimal::ZERO {
            return Err(invalid("default_balance", "must be 0 or greater"));
        }

        let ledger = &self.ledger;
        if ledger.lock_timeout_ms == 0 {
            return Err(invalid("lock_timeout_ms", "must be greater than 0"));
        }
        if ledger.busy_timeout_ms == 0 {
            return Err(invalid("busy_timeout_ms", "must be greater than 0"));
        }

        Ok(())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.limits, LimitsConfig::default());
        assert_eq!(config.ledger, LedgerConfig::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
            [logging]
            format = "json"

            [limits]
            stake_min = 1
            max_win = "500.50"

            [ledger]
            max_retries = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.limits.stake_min, dec!(1));
        assert_eq!(config.limits.max_win, dec!(500.50));
        assert_eq!(config.limits.stake_max, dec!(10000));
        assert_eq!(config.ledger.max_retries, 0);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let result = Config::parse_toml("[limits]\nodds_min = 5\nodds_max = 2\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "odds_max",
                ..
            }))
        ));
    }

    #[test]
    fn zero_lock_timeout_is_rejected() {
        let result = Config::parse_toml("[ledger]\nlock_timeout_ms = 0\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "lock_timeout_ms",
                ..
            }))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = Config::parse_toml("[limits\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn missing_explicit_file_is_a_read_error() {
        let result = Config::discover(Some(Path::new("/nonexistent/betslip.toml")));
        assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
    }
}
