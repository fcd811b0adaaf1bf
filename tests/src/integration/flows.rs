//! # Tracker Flows
//!
//! The reconciler and the tracker listener working against the in-memory
//! engine, with every engine event travelling over the shared bus.
//!
//! ## Flows Tested
//!
//! 1. **Fresh start**: one create per network, the listener connects
//! 2. **Shared network**: one create covering every desired currency
//! 3. **Switching currencies**: unwanted managers disconnect first
//! 4. **Race guard**: listener and pass together connect at most once
//! 5. **Discovery**: `NetworkAdded` -> create -> connect -> register

use std::time::Duration;

use futures::StreamExt;
use shared_types::{DesiredSet, Network, NetworkId, WalletManagerState};
use tokio::time::timeout;
use ws_01_wallet_tracker::{
    invariant_one_manager_per_network, invariant_tracked_iff_desired, BlockchainSystem,
    TrackerCommand, TrackerConfig, WalletTrackerApi,
};

use super::harness::{btc_mainnet, btc_testnet, eth_testnet, Harness};

// =============================================================================
// FIXTURES
// =============================================================================

fn desired(currencies: &[&str]) -> DesiredSet {
    DesiredSet::new(currencies.to_vec())
}

fn shared_testnet() -> Network {
    Network::new("multi-testnet", "Multi Testnet", false, ["BTC", "ETH"])
}

// =============================================================================
// RECONCILE + LISTENER
// =============================================================================

#[tokio::test]
async fn test_fresh_start_creates_then_listener_connects() {
    let mut h = Harness::new(TrackerConfig::for_testing(), desired(&["BTC"]));
    h.discover(btc_testnet());
    h.drain();

    let summary = h.tracker.reconcile(desired(&["BTC"])).await;
    let pass = h.system.take_commands();

    assert_eq!(summary.creates, 1);
    assert_eq!(pass.len(), 1);
    assert!(matches!(&pass[0], TrackerCommand::CreateManager { network, .. }
        if network == &NetworkId::new("bitcoin-testnet")));

    h.pump().await;

    assert_eq!(h.system.count("connect"), 1);
    assert_eq!(h.system.count("disconnect"), 0);
    let manager = h
        .system
        .manager_for_network(&NetworkId::new("bitcoin-testnet"))
        .unwrap();
    assert_eq!(manager.state, WalletManagerState::Connected);
    assert!(manager.has_wallet(&"btc".into()));
}

#[tokio::test]
async fn test_shared_network_single_create_then_registers_both() {
    let mut h = Harness::new(TrackerConfig::for_testing(), desired(&["BTC", "ETH"]));
    h.discover(shared_testnet());
    h.drain();

    h.tracker.reconcile(desired(&["BTC", "ETH"])).await;
    h.pump().await;

    let commands = h.system.commands();
    assert_eq!(h.system.count("createWalletManager"), 1);
    match &commands[0] {
        TrackerCommand::CreateManager { currencies, .. } => {
            assert_eq!(currencies.len(), 2);
        }
        other => panic!("expected create, got {other}"),
    }

    let registered: Vec<_> = commands
        .iter()
        .filter_map(|c| match c {
            TrackerCommand::RegisterWallet { currency, .. } => Some(currency.as_str().to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(registered, vec!["BTC".to_string(), "ETH".to_string()]);

    let snapshot = h.system.snapshot();
    assert!(invariant_tracked_iff_desired(&desired(&["BTC", "ETH"]), &snapshot).is_ok());
}

#[tokio::test]
async fn test_switching_currencies_disconnects_unwanted_manager() {
    let mut h = Harness::new(TrackerConfig::for_testing(), desired(&["BTC"]));
    h.discover(btc_testnet());
    h.discover(eth_testnet());
    let eth = h.system.insert_manager(
        &NetworkId::new("ethereum-ropsten"),
        WalletManagerState::Connected,
        ["ETH"],
    );
    h.drain();

    h.tracker.reconcile(desired(&["BTC"])).await;
    let pass = h.system.commands();

    assert_eq!(pass[0], TrackerCommand::Disconnect(eth.clone()));
    assert_eq!(h.system.count("disconnect"), 1);
    assert!(!pass.contains(&TrackerCommand::Connect(eth.clone())));

    // The disconnect reaches the listener as a state change it ignores.
    h.pump().await;
    assert!(!h.system.commands().contains(&TrackerCommand::Connect(eth)));

    let snapshot = h.system.snapshot();
    assert!(invariant_tracked_iff_desired(&desired(&["BTC"]), &snapshot).is_ok());
    assert!(invariant_one_manager_per_network(&snapshot).is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_race_between_pass_and_listener_connects_once() {
    for _ in 0..25 {
        let mut h = Harness::new(TrackerConfig::for_testing(), desired(&["BTC"]));
        h.discover(btc_testnet());
        h.drain();

        // Creates the manager and queues ManagerCreated on the bus.
        h.tracker.reconcile(desired(&["BTC"])).await;

        let tracker = h.tracker.clone();
        let second_pass = tokio::spawn(async move { tracker.reconcile(desired(&["BTC"])).await });
        h.pump().await;
        second_pass.await.unwrap();
        h.pump().await;

        assert_eq!(h.system.count("connect"), 1);
    }
}

#[tokio::test]
async fn test_discovery_flow_tracks_desired_network() {
    let mut h = Harness::new(TrackerConfig::for_testing(), desired(&["eth"]));
    h.discover(btc_testnet());
    h.discover(eth_testnet());

    h.pump().await;

    // Only the network carrying a desired currency gets a manager.
    assert!(h
        .system
        .manager_for_network(&NetworkId::new("bitcoin-testnet"))
        .is_none());
    let manager = h
        .system
        .manager_for_network(&NetworkId::new("ethereum-ropsten"))
        .unwrap();
    assert_eq!(manager.state, WalletManagerState::Connected);
    assert!(manager.has_wallet(&"ETH".into()));
    assert_eq!(h.system.count("createWalletManager"), 1);
    assert_eq!(h.system.count("connect"), 1);
}

#[tokio::test]
async fn test_mainnet_network_on_testnet_config_is_ignored() {
    let mut h = Harness::new(TrackerConfig::for_testing(), desired(&["BTC"]));
    h.discover(btc_mainnet());

    h.pump().await;

    assert!(h.system.commands().is_empty());
    assert!(h.system.snapshot().managers.is_empty());
}

#[tokio::test]
async fn test_deleted_manager_is_recreated() {
    let mut h = Harness::new(TrackerConfig::for_testing(), desired(&["BTC"]));
    h.discover(btc_testnet());
    let old = h.system.insert_manager(
        &NetworkId::new("bitcoin-testnet"),
        WalletManagerState::Connected,
        ["BTC"],
    );
    h.system.delete_manager(&old).unwrap();
    h.drain();

    h.tracker.reconcile(desired(&["BTC"])).await;
    h.pump().await;

    let manager = h
        .system
        .manager_for_network(&NetworkId::new("bitcoin-testnet"))
        .unwrap();
    assert_ne!(manager.id, old);
    assert_eq!(manager.state, WalletManagerState::Connected);
}

// =============================================================================
// MONITOR
// =============================================================================

#[tokio::test]
async fn test_monitor_follows_desired_set() {
    let mut h = Harness::new(TrackerConfig::for_testing(), desired(&["BTC"]));
    h.discover(btc_testnet());
    h.discover(eth_testnet());
    h.drain();

    let mut passes = h.tracker.monitor_tracked_wallets().unwrap();

    let first = timeout(Duration::from_secs(1), passes.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.creates, 1);
    h.pump().await;

    h.feed.publish(desired(&["ETH"]));
    let second = timeout(Duration::from_secs(1), passes.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.disconnects, 1);
    assert_eq!(second.creates, 1);
    h.pump().await;

    let btc = h
        .system
        .manager_for_network(&NetworkId::new("bitcoin-testnet"))
        .unwrap();
    let eth = h
        .system
        .manager_for_network(&NetworkId::new("ethereum-ropsten"))
        .unwrap();
    assert_eq!(btc.state, WalletManagerState::Disconnected);
    assert_eq!(eth.state, WalletManagerState::Connected);

    assert!(h.tracker.monitor_tracked_wallets().is_err());
}
