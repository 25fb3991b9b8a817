//! # Runtime Configuration
//!
//! Typed configuration loaded from an optional `stockroom.toml` file and
//! `STOCKROOM_*` environment variables, with `.env` support for local
//! development.
//!
//! # Examples
//!
//! ```
//! use stockroom::config::StockroomConfig;
//! use stockroom::domain::value_objects::StrategyKind;
//!
//! let config = StockroomConfig::default();
//! assert_eq!(config.inventory.base_url, "http://localhost:8081");
//! assert_eq!(config.strategy_kind(), StrategyKind::OldestFirst);
//! ```

use crate::domain::value_objects::StrategyKind;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

/// Settings for the remote inventory service boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InventorySettings {
    /// Base URL of the inventory service.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081".to_string(),
            timeout_ms: 5000,
        }
    }
}

/// Settings for the allocation engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AllocationSettings {
    /// Consumption policy key. Unknown keys resolve to the documented
    /// default (oldest-first); see
    /// [`StrategyKind::from_key`].
    pub strategy: String,
    /// Seconds a reservation receipt stays replayable by its token.
    pub replay_window_secs: u64,
}

impl Default for AllocationSettings {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::OldestFirst.to_string(),
            replay_window_secs: 300,
        }
    }
}

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StockroomConfig {
    /// Remote inventory boundary settings.
    pub inventory: InventorySettings,
    /// Allocation engine settings.
    pub allocation: AllocationSettings,
}

impl StockroomConfig {
    /// Loads configuration from `stockroom.toml` (optional) and
    /// `STOCKROOM_*` environment variables (`__` as section separator,
    /// e.g. `STOCKROOM_INVENTORY__BASE_URL`).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a source is malformed or a value
    /// cannot be deserialized.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .add_source(File::with_name("stockroom").required(false))
            .add_source(Environment::with_prefix("STOCKROOM").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Resolves the configured strategy key, warning when an unknown key
    /// falls back to the default policy.
    #[must_use]
    pub fn strategy_kind(&self) -> StrategyKind {
        let key = &self.allocation.strategy;
        if key.parse::<StrategyKind>().is_err() {
            warn!(key = %key, "unknown allocation strategy key, using default");
        }
        StrategyKind::from_key(key)
    }

    /// Returns the replay window as a duration.
    #[must_use]
    pub fn replay_window(&self) -> Duration {
        Duration::from_secs(self.allocation.replay_window_secs)
    }
}
