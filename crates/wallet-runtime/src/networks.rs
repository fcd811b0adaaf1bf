//! # Well-Known Networks
//!
//! The networks the in-process engine discovers at startup.

use shared_types::Network;

/// Well-known networks of one flavor, in discovery order.
pub fn well_known_networks(is_mainnet: bool) -> Vec<Network> {
    if is_mainnet {
        vec![
            Network::new("bitcoin-mainnet", "Bitcoin", true, ["BTC"]),
            Network::new("bitcoincash-mainnet", "Bitcoin Cash", true, ["BCH"]),
            Network::new(
                "ethereum-mainnet",
                "Ethereum",
                true,
                ["ETH", "BRD", "USDT", "DAI", "TUSD"],
            ),
        ]
    } else {
        vec![
            Network::new("bitcoin-testnet", "Bitcoin Testnet", false, ["BTC"]),
            Network::new("bitcoincash-testnet", "Bitcoin Cash Testnet", false, ["BCH"]),
            Network::new("ethereum-ropsten", "Ethereum Ropsten", false, ["ETH", "BRD"]),
        ]
    }
}
