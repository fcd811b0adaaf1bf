//! # Tracker Listener
//!
//! Adapts engine callbacks to the tracker service. Callbacks never block:
//! `ManagerCreated` and `NetworkAdded` are handed to a task on the injected
//! runtime, everything else is ignored.

use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use super::service::WalletTrackerService;
use crate::ports::{BlockchainSystem, DesiredSetSource, SystemListener, WalletTrackerApi};
use shared_bus::{ManagerEvent, SystemEvent};
use shared_types::WalletManagerSnapshot;

/// Engine listener backed by a [`WalletTrackerService`].
pub struct TrackerListener<S: BlockchainSystem, D: DesiredSetSource> {
    service: Arc<WalletTrackerService<S, D>>,
    handle: Handle,
}

impl<S: BlockchainSystem, D: DesiredSetSource> TrackerListener<S, D> {
    /// Create a listener that runs its work on `handle`.
    pub fn new(service: Arc<WalletTrackerService<S, D>>, handle: Handle) -> Self {
        Self { service, handle }
    }

    /// The service this listener drives.
    pub fn service(&self) -> &Arc<WalletTrackerService<S, D>> {
        &self.service
    }
}

impl<S, D> SystemListener for TrackerListener<S, D>
where
    S: BlockchainSystem + 'static,
    D: DesiredSetSource + 'static,
{
    fn handle_system_event(&self, event: &SystemEvent) -> Option<JoinHandle<()>> {
        let SystemEvent::NetworkAdded(network) = event else {
            return None;
        };
        let service = Arc::clone(&self.service);
        let network = network.clone();
        Some(self.handle.spawn(async move {
            let outcome = service.on_network_added(network).await;
            debug!("[ws-01] NetworkAdded handled: {:?}", outcome);
        }))
    }

    fn handle_manager_event(
        &self,
        manager: &WalletManagerSnapshot,
        event: &ManagerEvent,
    ) -> Option<JoinHandle<()>> {
        if *event != ManagerEvent::Created {
            return None;
        }
        let service = Arc::clone(&self.service);
        let manager = manager.clone();
        Some(self.handle.spawn(async move {
            let outcome = service.on_manager_created(manager).await;
            debug!("[ws-01] ManagerCreated handled: {:?}", outcome);
        }))
    }
}
