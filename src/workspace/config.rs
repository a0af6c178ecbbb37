//! Workspace configuration loaded from the environment.
//!
//! # Environment Variables
//!
//! - `NOVATRA_DATA_DIR`: snapshot directory (default: `./novatra-data`)
//! - `NOVATRA_SEED_ADMIN`: seed the default administrator into an empty
//!   workspace (default: `true`)
//!
//! An optional `.env` file is read first.

use camino::Utf8PathBuf;
use std::env;
use thiserror::Error;

/// Environment variable naming the snapshot directory.
pub const DATA_DIR_ENV: &str = "NOVATRA_DATA_DIR";
/// Environment variable toggling the default administrator.
pub const SEED_ADMIN_ENV: &str = "NOVATRA_SEED_ADMIN";
/// Snapshot directory used when none is configured.
pub const DEFAULT_DATA_DIR: &str = "./novatra-data";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A boolean variable held something other than a boolean.
    #[error("{key} must be a boolean, got '{value}'")]
    InvalidBool {
        /// Offending variable.
        key: &'static str,
        /// Value found.
        value: String,
    },
    /// The data directory variable was set but blank.
    #[error("NOVATRA_DATA_DIR must not be empty")]
    EmptyDataDir,
}

/// Settings for opening a persistent workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceConfig {
    /// Directory holding one JSON file per record set.
    pub data_dir: Utf8PathBuf,
    /// Whether an empty workspace receives the default administrator.
    pub seed_admin: bool,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            data_dir: Utf8PathBuf::from(DEFAULT_DATA_DIR),
            seed_admin: true,
        }
    }
}

impl WorkspaceConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps variable names to
    /// values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = match lookup(DATA_DIR_ENV) {
            Some(raw) if raw.trim().is_empty() => return Err(ConfigError::EmptyDataDir),
            Some(raw) => Utf8PathBuf::from(raw.trim()),
            None => Utf8PathBuf::from(DEFAULT_DATA_DIR),
        };
        let seed_admin = match lookup(SEED_ADMIN_ENV) {
            Some(raw) => parse_bool(SEED_ADMIN_ENV, &raw)?,
            None => true,
        };
        Ok(Self {
            data_dir,
            seed_admin,
        })
    }

    /// Replaces the snapshot directory.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<Utf8PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Enables or disables seeding the default administrator.
    #[must_use]
    pub const fn with_seed_admin(mut self, seed_admin: bool) -> Self {
        self.seed_admin = seed_admin;
        self
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: raw.to_owned(),
        }),
    }
}
