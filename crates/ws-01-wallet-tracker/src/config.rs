//! # Wallet Tracker Configuration

use serde::{Deserialize, Serialize};
use shared_types::WalletManagerMode;

/// Wallet tracker configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Only networks whose mainnet flag equals this get managers created
    /// when they are discovered.
    pub is_mainnet: bool,

    /// Mode passed to every `createWalletManager` request.
    pub manager_mode: WalletManagerMode,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            is_mainnet: true,
            manager_mode: WalletManagerMode::ApiOnly,
        }
    }
}

impl TrackerConfig {
    /// Create a config for testing (testnet, P2P sync).
    pub fn for_testing() -> Self {
        Self {
            is_mainnet: false,
            manager_mode: WalletManagerMode::P2pWithApiSync,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert!(config.is_mainnet);
        assert_eq!(config.manager_mode, WalletManagerMode::ApiOnly);
    }

    #[test]
    fn test_testing_config() {
        let config = TrackerConfig::for_testing();
        assert!(!config.is_mainnet);
    }
}
