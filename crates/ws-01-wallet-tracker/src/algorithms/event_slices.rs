//! # Event Slices
//!
//! The narrow decisions the listener makes for `ManagerCreated` and
//! `NetworkAdded`.

use crate::domain::IgnoreReason;
use shared_types::{CurrencyId, DesiredSet, Network, SystemSnapshot};

/// Wallets to register on a freshly created manager: every desired currency
/// of its network, in the network's spelling.
///
/// Includes currencies the manager was created with. Registering an existing
/// wallet is a no-op in the engine.
pub fn manager_created_registrations(desired: &DesiredSet, network: &Network) -> Vec<CurrencyId> {
    desired
        .matching(network)
        .iter()
        .map(|c| network.find_currency(c).unwrap_or(c).clone())
        .collect()
}

/// Should a manager be created for a newly discovered network?
pub fn network_added_decision(
    desired: &DesiredSet,
    network: &Network,
    is_mainnet: bool,
    snapshot: &SystemSnapshot,
) -> Result<(), IgnoreReason> {
    if network.is_mainnet != is_mainnet {
        return Err(IgnoreReason::MainnetMismatch);
    }
    if !desired.intersects(network) {
        return Err(IgnoreReason::NoDesiredCurrency);
    }
    if snapshot.manager_for_network(&network.id).is_some() {
        return Err(IgnoreReason::ManagerExists);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{ManagerId, NetworkId, WalletManagerSnapshot, WalletManagerState};

    fn eth() -> Network {
        Network::new("eth-main", "Ethereum", true, ["ETH", "BRD"])
    }

    fn eth_manager(wallets: &[&str]) -> WalletManagerSnapshot {
        WalletManagerSnapshot {
            id: ManagerId::new("wm-eth"),
            name: "Ethereum".into(),
            network: NetworkId::new("eth-main"),
            state: WalletManagerState::Created,
            wallets: wallets.iter().map(|w| CurrencyId::new(*w)).collect(),
        }
    }

    #[test]
    fn test_registrations_follow_desired_order() {
        let desired = DesiredSet::new(["brd", "btc", "eth"]);
        let regs = manager_created_registrations(&desired, &eth());
        assert_eq!(regs, vec![CurrencyId::new("BRD"), CurrencyId::new("ETH")]);
        assert_eq!(regs[0].as_str(), "BRD");
    }

    #[test]
    fn test_network_added_mainnet_mismatch() {
        let desired = DesiredSet::new(["eth"]);
        let result = network_added_decision(&desired, &eth(), false, &SystemSnapshot::default());
        assert_eq!(result, Err(IgnoreReason::MainnetMismatch));
    }

    #[test]
    fn test_network_added_without_desired_currency() {
        let desired = DesiredSet::new(["btc"]);
        let result = network_added_decision(&desired, &eth(), true, &SystemSnapshot::default());
        assert_eq!(result, Err(IgnoreReason::NoDesiredCurrency));
    }

    #[test]
    fn test_network_added_with_existing_manager() {
        let desired = DesiredSet::new(["eth"]);
        let snapshot = SystemSnapshot {
            networks: vec![eth()],
            managers: vec![eth_manager(&[])],
        };
        let result = network_added_decision(&desired, &eth(), true, &snapshot);
        assert_eq!(result, Err(IgnoreReason::ManagerExists));
    }

    #[test]
    fn test_network_added_creates() {
        let desired = DesiredSet::new(["BRD"]);
        assert!(network_added_decision(&desired, &eth(), true, &SystemSnapshot::default()).is_ok());
    }
}
