//! # Inbound Ports
//!
//! The tracker's own API, and the callback surface the engine drives.

use crate::domain::{ListenerOutcome, ReconcileSummary};
use async_trait::async_trait;
use shared_bus::{
    EngineEvent, ManagerEvent, NetworkEvent, SystemEvent, TransferEvent, WalletEvent,
};
use shared_types::{CurrencyId, DesiredSet, ManagerId, Network, NetworkId, WalletManagerSnapshot};
use tokio::task::JoinHandle;

/// Wallet tracker API - inbound port.
///
/// Every method runs inside the tracker's critical section.
#[async_trait]
pub trait WalletTrackerApi: Send + Sync {
    /// Run one reconciliation pass against `desired`.
    async fn reconcile(&self, desired: DesiredSet) -> ReconcileSummary;

    /// Connect a newly created manager and register its desired wallets.
    async fn on_manager_created(&self, manager: WalletManagerSnapshot) -> ListenerOutcome;

    /// Create a manager for a newly discovered network if it is wanted.
    async fn on_network_added(&self, network: Network) -> ListenerOutcome;
}

/// Engine event callbacks.
///
/// Callbacks are synchronous and must not block. Work is handed off to a
/// task; the returned handle is `None` when the event needs no work.
pub trait SystemListener: Send + Sync {
    /// System-level events (network discovery, manager added).
    fn handle_system_event(&self, event: &SystemEvent) -> Option<JoinHandle<()>>;

    /// Manager lifecycle and sync events.
    fn handle_manager_event(
        &self,
        manager: &WalletManagerSnapshot,
        event: &ManagerEvent,
    ) -> Option<JoinHandle<()>>;

    /// Wallet events.
    fn handle_wallet_event(
        &self,
        _manager: &ManagerId,
        _currency: &CurrencyId,
        _event: &WalletEvent,
    ) -> Option<JoinHandle<()>> {
        None
    }

    /// Transfer events.
    fn handle_transfer_event(
        &self,
        _manager: &ManagerId,
        _currency: &CurrencyId,
        _transfer: &str,
        _event: &TransferEvent,
    ) -> Option<JoinHandle<()>> {
        None
    }

    /// Network events.
    fn handle_network_event(
        &self,
        _network: &NetworkId,
        _event: &NetworkEvent,
    ) -> Option<JoinHandle<()>> {
        None
    }

    /// Dispatch an engine event to the matching callback.
    fn handle_event(&self, event: &EngineEvent) -> Option<JoinHandle<()>> {
        match event {
            EngineEvent::System(event) => self.handle_system_event(event),
            EngineEvent::Manager { manager, event } => self.handle_manager_event(manager, event),
            EngineEvent::Wallet {
                manager,
                currency,
                event,
            } => self.handle_wallet_event(manager, currency, event),
            EngineEvent::Transfer {
                manager,
                currency,
                transfer,
                event,
            } => self.handle_transfer_event(manager, currency, transfer, event),
            EngineEvent::Network { network, event } => self.handle_network_event(network, event),
        }
    }
}
