//! # Fleet configuration — `fleet.toml`
//!
//! Defines the TOML configuration read by the embedding application before it
//! builds a [`crate::FleetContext`] (filename: [`FleetConfig::filename`] =
//! `"fleet.toml"`).
//!
//! ## Structure
//!
//! ```toml
//! [storage]
//! users_key = "APP_USERS_V1"
//! availability_key = "APP_AVAILABILITY_V1"
//! session_key = "APP_CURRENT_USER_V1"
//!
//! [roster]
//! seed_demo_drivers = true   # seed two demo drivers when no roster is stored
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`FleetConfig`] | Top-level config with TOML (de)serialisation and the canonical filename. |
//! | [`StorageConfig`] | Names of the three records in the key/value store. |
//! | [`RosterConfig`] | Startup behaviour of the roster. |
//!
//! All structs implement `Default`, so a missing or empty config file is
//! equivalent to the default configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration that could not be parsed or written.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid fleet config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialise fleet config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level configuration stored in `fleet.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub roster: RosterConfig,
}

/// Keys of the persisted records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_users_key")]
    pub users_key: String,
    #[serde(default = "default_availability_key")]
    pub availability_key: String,
    #[serde(default = "default_session_key")]
    pub session_key: String,
}

fn default_users_key() -> String {
    "APP_USERS_V1".to_string()
}

fn default_availability_key() -> String {
    "APP_AVAILABILITY_V1".to_string()
}

fn default_session_key() -> String {
    "APP_CURRENT_USER_V1".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            users_key: default_users_key(),
            availability_key: default_availability_key(),
            session_key: default_session_key(),
        }
    }
}

/// Roster startup configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Seed the demonstration drivers when no roster is stored.
    #[serde(default = "default_seed_demo_drivers")]
    pub seed_demo_drivers: bool,
}

fn default_seed_demo_drivers() -> bool {
    true
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            seed_demo_drivers: default_seed_demo_drivers(),
        }
    }
}

impl FleetConfig {
    /// Builder method to toggle demo seeding.
    pub fn with_demo_seed(mut self, seed: bool) -> Self {
        self.roster.seed_demo_drivers = seed;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "fleet.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
