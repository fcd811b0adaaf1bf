//! # Rescan Flow
//!
//! The rescan handler (ws-02) resyncing managers the tracker (ws-01) set up.

use std::sync::Arc;

use parking_lot::Mutex;
use shared_bus::{EngineEvent, EventFilter, ManagerEvent};
use shared_types::{DesiredSet, NetworkId, SyncDepth};
use ws_01_wallet_tracker::{InMemorySystem, TrackerCommand, TrackerConfig, WalletTrackerApi};
use ws_02_sync_blockchain::{
    NavEffectTransformer, NavTarget, SyncBlockchainHandler, SyncEffect, SyncEvent, ViewActions,
};

use super::harness::{btc_testnet, eth_testnet, Harness};

#[derive(Default)]
struct PromptCounter(Mutex<usize>);

impl ViewActions for PromptCounter {
    fn show_rescan_prompt(&self) {
        *self.0.lock() += 1;
    }
}

#[derive(Default)]
struct NavLog(Mutex<Vec<NavTarget>>);

impl NavEffectTransformer for NavLog {
    fn navigate(&self, target: NavTarget) -> Option<SyncEvent> {
        self.0.lock().push(target);
        None
    }
}

type Handler = SyncBlockchainHandler<InMemorySystem, PromptCounter, NavLog>;

async fn tracked(currencies: &[&str]) -> (Harness, Handler, Arc<PromptCounter>) {
    let desired = DesiredSet::new(currencies.to_vec());
    let mut h = Harness::new(TrackerConfig::for_testing(), desired.clone());
    h.discover(btc_testnet());
    h.discover(eth_testnet());
    h.drain();
    h.tracker.reconcile(desired).await;
    h.pump().await;

    let view = Arc::new(PromptCounter::default());
    let handler =
        SyncBlockchainHandler::new(Arc::clone(&h.system), Arc::clone(&view), Arc::new(NavLog::default()));
    (h, handler, view)
}

#[tokio::test]
async fn test_rescan_of_tracked_wallet_starts_sync() {
    let (h, handler, _) = tracked(&["BTC"]).await;
    let mut events = h.bus.subscribe(EventFilter::all());
    let manager = h
        .system
        .manager_for_network(&NetworkId::new("bitcoin-testnet"))
        .unwrap();

    let event = handler.handle(SyncEffect::SyncBlockchain {
        currency: "btc".into(),
    });

    assert_eq!(
        event,
        Some(SyncEvent::OnSyncStarted {
            manager: manager.id.clone()
        })
    );
    assert_eq!(
        h.system.commands().last(),
        Some(&TrackerCommand::SyncToDepth {
            manager: manager.id.clone(),
            depth: SyncDepth::FromLastTrustedBlock,
        })
    );
    match events.try_recv() {
        Ok(Some(EngineEvent::Manager { manager: m, event })) => {
            assert_eq!(m.id, manager.id);
            assert_eq!(event, ManagerEvent::SyncStarted);
        }
        other => panic!("expected SyncStarted, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rescan_of_token_uses_network_manager() {
    let (h, handler, _) = tracked(&["ETH"]).await;
    let eth = h
        .system
        .manager_for_network(&NetworkId::new("ethereum-ropsten"))
        .unwrap();

    // BRD has no wallet yet; its network's manager still resyncs.
    assert_eq!(handler.rescan(&"BRD".into()).unwrap(), eth.id);
}

#[tokio::test]
async fn test_rescan_of_disconnected_manager_fails() {
    let (h, handler, _) = tracked(&["ETH"]).await;
    h.feed.publish(DesiredSet::default());
    h.tracker.reconcile(DesiredSet::default()).await;

    let event = handler.handle(SyncEffect::SyncBlockchain {
        currency: "ETH".into(),
    });
    assert!(matches!(event, Some(SyncEvent::OnSyncFailed { .. })));
}

#[tokio::test]
async fn test_rescan_without_manager_fails_and_prompt_is_shown() {
    let (_h, handler, view) = tracked(&["ETH"]).await;

    assert!(handler.handle(SyncEffect::ShowSyncConfirmation).is_none());
    assert_eq!(*view.0.lock(), 1);

    match handler.handle(SyncEffect::SyncBlockchain {
        currency: "BTC".into(),
    }) {
        Some(SyncEvent::OnSyncFailed { currency, .. }) => assert_eq!(currency, "BTC"),
        other => panic!("expected OnSyncFailed, got {other:?}"),
    }
    assert!(handler.handle(SyncEffect::Nav(NavTarget::GoBack)).is_none());
}
