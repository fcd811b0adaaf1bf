//! # Outbound Ports
//!
//! What the tracker needs from the outside: the engine and the desired set.

use crate::domain::TrackerError;
use async_trait::async_trait;
use shared_bus::DesiredSetStream;
use shared_types::{
    CurrencyId, DesiredSet, EngineError, ManagerId, NetworkId, SyncDepth, SystemSnapshot,
    WalletManagerMode, WalletManagerState,
};

/// The blockchain engine - outbound port.
///
/// Commands are requests: they return once accepted, and the engine reports
/// completion through events. Snapshots are always current.
pub trait BlockchainSystem: Send + Sync {
    /// Current networks and managers.
    fn snapshot(&self) -> SystemSnapshot;

    /// Live state of one manager.
    fn manager_state(&self, manager: &ManagerId) -> Option<WalletManagerState> {
        self.snapshot().manager(manager).map(|m| m.state)
    }

    /// Request a manager for `network`, pre-registering `currencies`.
    fn create_wallet_manager(
        &self,
        network: &NetworkId,
        mode: WalletManagerMode,
        currencies: &[CurrencyId],
    ) -> Result<(), EngineError>;

    /// Connect a manager.
    fn connect(&self, manager: &ManagerId) -> Result<(), EngineError>;

    /// Disconnect a manager.
    fn disconnect(&self, manager: &ManagerId) -> Result<(), EngineError>;

    /// Register a wallet for `currency` on `manager`.
    fn register_wallet(&self, manager: &ManagerId, currency: &CurrencyId)
        -> Result<(), EngineError>;

    /// Re-sync a manager's chain from `depth`.
    fn sync_to_depth(&self, manager: &ManagerId, depth: SyncDepth) -> Result<(), EngineError>;
}

/// Source of desired sets - outbound port.
#[async_trait]
pub trait DesiredSetSource: Send + Sync {
    /// Stream of desired sets: the current one, then every replacement.
    fn subscribe(&self) -> DesiredSetStream;

    /// The current desired set, waiting for one if none was published.
    async fn first(&self) -> Result<DesiredSet, TrackerError>;
}
