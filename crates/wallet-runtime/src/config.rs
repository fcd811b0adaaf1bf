//! # Runtime Configuration
//!
//! ## Environment Variables
//!
//! - `WS_MAINNET`: Track mainnet (`true`) or testnet networks (default: true)
//! - `WS_MANAGER_MODE`: Mode for new wallet managers (default: api_only)
//! - `WS_ENABLED_WALLETS`: Comma separated initial desired set (default: BTC,ETH)
//! - `WS_BUS_CAPACITY`: Event bus channel capacity (default: 1000)
//! - `WS_SHUTDOWN_GRACE_MS`: Time tasks get to stop (default: 2000)
//! - `WS_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
//! - `WS_JSON_LOGS`: JSON log output (default: false)

use std::env;
use std::time::Duration;
use thiserror::Error;

use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::{DesiredSet, UnknownModeError, WalletManagerMode};
use ws_01_wallet_tracker::TrackerConfig;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The event bus needs room for at least one event.
    #[error("WS_BUS_CAPACITY must be greater than zero")]
    ZeroBusCapacity,

    /// `WS_MANAGER_MODE` names no known mode.
    #[error(transparent)]
    UnknownMode(#[from] UnknownModeError),

    /// A variable could not be parsed.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Wallet tracker configuration.
    pub tracker: TrackerConfig,
    /// Desired set published at startup.
    pub enabled_wallets: DesiredSet,
    /// Event bus capacity.
    pub bus_capacity: usize,
    /// How long tasks get to stop on shutdown.
    pub shutdown_grace: Duration,
    /// `EnvFilter` directive.
    pub log_level: String,
    /// Emit JSON logs.
    pub json_logs: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            enabled_wallets: DesiredSet::new(["BTC", "ETH"]),
            bus_capacity: DEFAULT_CHANNEL_CAPACITY,
            shutdown_grace: Duration::from_secs(2),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let is_mainnet = match lookup("WS_MAINNET") {
            Some(v) => parse_bool("WS_MAINNET", &v)?,
            None => defaults.tracker.is_mainnet,
        };
        let manager_mode = match lookup("WS_MANAGER_MODE") {
            Some(v) => v.parse::<WalletManagerMode>()?,
            None => defaults.tracker.manager_mode,
        };
        let enabled_wallets = match lookup("WS_ENABLED_WALLETS") {
            Some(v) => parse_wallets(&v),
            None => defaults.enabled_wallets,
        };
        let bus_capacity = match lookup("WS_BUS_CAPACITY") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: "WS_BUS_CAPACITY",
                value: v.clone(),
            })?,
            None => defaults.bus_capacity,
        };
        let shutdown_grace = match lookup("WS_SHUTDOWN_GRACE_MS") {
            Some(v) => Duration::from_millis(v.trim().parse().map_err(|_| {
                ConfigError::InvalidValue {
                    var: "WS_SHUTDOWN_GRACE_MS",
                    value: v.clone(),
                }
            })?),
            None => defaults.shutdown_grace,
        };
        let log_level = lookup("WS_LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or(defaults.log_level);
        let json_logs = match lookup("WS_JSON_LOGS") {
            Some(v) => parse_bool("WS_JSON_LOGS", &v)?,
            None => defaults.json_logs,
        };

        Ok(Self {
            tracker: TrackerConfig {
                is_mainnet,
                manager_mode,
            },
            enabled_wallets,
            bus_capacity,
            shutdown_grace,
            log_level,
            json_logs,
        })
    }

    /// Reject configurations the runtime cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bus_capacity == 0 {
            return Err(ConfigError::ZeroBusCapacity);
        }
        Ok(())
    }

    /// Create a config for testing (testnet, short grace period).
    pub fn for_testing() -> Self {
        Self {
            tracker: TrackerConfig::for_testing(),
            shutdown_grace: Duration::from_millis(50),
            log_level: "debug".to_string(),
            ..Self::default()
        }
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        }),
    }
}

fn parse_wallets(value: &str) -> DesiredSet {
    value
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RuntimeConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("WS_MAINNET", "false"),
            ("WS_MANAGER_MODE", "p2p-only"),
            ("WS_ENABLED_WALLETS", "btc, bch,,eth,BTC"),
            ("WS_BUS_CAPACITY", "16"),
            ("WS_SHUTDOWN_GRACE_MS", "250"),
            ("RUST_LOG", "debug"),
            ("WS_JSON_LOGS", "1"),
        ]))
        .unwrap();

        assert!(!config.tracker.is_mainnet);
        assert_eq!(config.tracker.manager_mode, WalletManagerMode::P2pOnly);
        assert_eq!(config.enabled_wallets, DesiredSet::new(["BTC", "BCH", "ETH"]));
        assert_eq!(config.bus_capacity, 16);
        assert_eq!(config.shutdown_grace, Duration::from_millis(250));
        assert_eq!(config.log_level, "debug");
        assert!(config.json_logs);
    }

    #[test]
    fn test_ws_log_level_wins_over_rust_log() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("WS_LOG_LEVEL", "ws_01_wallet_tracker=trace"),
            ("RUST_LOG", "warn"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, "ws_01_wallet_tracker=trace");
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = RuntimeConfig::from_lookup(lookup(&[("WS_MANAGER_MODE", "carrier-pigeon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownMode(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(RuntimeConfig::from_lookup(lookup(&[("WS_MAINNET", "maybe")])).is_err());
        assert!(RuntimeConfig::from_lookup(lookup(&[("WS_BUS_CAPACITY", "-1")])).is_err());
    }

    #[test]
    fn test_zero_capacity_fails_validation() {
        let config = RuntimeConfig::from_lookup(lookup(&[("WS_BUS_CAPACITY", "0")])).unwrap();
        assert_eq!(config.validate(), Err(ConfigError::ZeroBusCapacity));
    }
}
