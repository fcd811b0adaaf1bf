//! # In-Memory Engine
//!
//! A `BlockchainSystem` that keeps networks and managers in memory, records
//! every command it receives, and optionally publishes engine events on a
//! bus. Used by the runtime's demo mode and by tests.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

use crate::domain::TrackerCommand;
use crate::ports::BlockchainSystem;
use shared_bus::{EngineEvent, InMemoryEventBus, ManagerEvent, SystemEvent, WalletEvent};
use shared_types::{
    CurrencyId, EngineError, ManagerId, Network, NetworkId, SyncDepth, SystemSnapshot,
    WalletManagerMode, WalletManagerSnapshot, WalletManagerState,
};

#[derive(Default)]
struct EngineState {
    snapshot: SystemSnapshot,
    next_manager: u64,
}

impl EngineState {
    fn live_manager_mut(&mut self, id: &ManagerId) -> Result<&mut WalletManagerSnapshot, EngineError> {
        self.snapshot
            .managers
            .iter_mut()
            .find(|m| &m.id == id && m.state != WalletManagerState::Deleted)
            .ok_or_else(|| EngineError::UnknownManager(id.clone()))
    }
}

/// In-memory blockchain engine.
pub struct InMemorySystem {
    state: Mutex<EngineState>,
    commands: Mutex<Vec<TrackerCommand>>,
    bus: Option<Arc<InMemoryEventBus>>,
    apply: bool,
}

impl InMemorySystem {
    /// An engine that applies commands and publishes nothing.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(EngineState::default()),
            commands: Mutex::new(Vec::new()),
            bus: None,
            apply: true,
        }
    }

    /// An engine that applies commands and publishes events on `bus`.
    pub fn with_bus(bus: Arc<InMemoryEventBus>) -> Self {
        Self {
            bus: Some(bus),
            ..Self::new()
        }
    }

    /// An engine that records commands but never changes state.
    pub fn recording() -> Self {
        Self {
            apply: false,
            ..Self::new()
        }
    }

    /// Discover a network. Publishes `NetworkAdded`.
    pub fn add_network(&self, network: Network) {
        debug!("[ws-01] Engine discovered network {}", network.id);
        self.state.lock().snapshot.networks.push(network.clone());
        self.emit(vec![EngineEvent::System(SystemEvent::NetworkAdded(network))]);
    }

    /// Seed a manager directly, without commands or events.
    pub fn insert_manager<I, C>(
        &self,
        network: &NetworkId,
        state: WalletManagerState,
        wallets: I,
    ) -> ManagerId
    where
        I: IntoIterator<Item = C>,
        C: Into<CurrencyId>,
    {
        let mut engine = self.state.lock();
        let mut manager = Self::new_manager(&mut engine, network, state);
        let id = manager.id.clone();
        manager.wallets = wallets.into_iter().map(Into::into).collect();
        engine.snapshot.managers.push(manager);
        id
    }

    /// Delete a manager. Publishes `ManagerDeleted`.
    pub fn delete_manager(&self, id: &ManagerId) -> Result<(), EngineError> {
        let snapshot = {
            let mut engine = self.state.lock();
            let manager = engine.live_manager_mut(id)?;
            manager.state = WalletManagerState::Deleted;
            manager.clone()
        };
        self.emit(vec![EngineEvent::Manager {
            manager: snapshot,
            event: ManagerEvent::Deleted,
        }]);
        Ok(())
    }

    /// Every command received, in order.
    pub fn commands(&self) -> Vec<TrackerCommand> {
        self.commands.lock().clone()
    }

    /// Drain the command log.
    pub fn take_commands(&self) -> Vec<TrackerCommand> {
        std::mem::take(&mut *self.commands.lock())
    }

    /// Count received commands of a kind (see [`TrackerCommand::kind`]).
    pub fn count(&self, kind: &str) -> usize {
        self.commands
            .lock()
            .iter()
            .filter(|c| c.kind() == kind)
            .count()
    }

    /// The live manager bound to `network`.
    pub fn manager_for_network(&self, network: &NetworkId) -> Option<WalletManagerSnapshot> {
        self.state
            .lock()
            .snapshot
            .manager_for_network(network)
            .cloned()
    }

    fn new_manager(
        engine: &mut EngineState,
        network: &NetworkId,
        state: WalletManagerState,
    ) -> WalletManagerSnapshot {
        engine.next_manager += 1;
        let name = engine
            .snapshot
            .network(network)
            .map(|n| n.name.clone())
            .unwrap_or_else(|| network.to_string());
        WalletManagerSnapshot {
            id: ManagerId::new(format!("wm-{}", engine.next_manager)),
            name,
            network: network.clone(),
            state,
            wallets: Vec::new(),
        }
    }

    fn record(&self, command: TrackerCommand) {
        self.commands.lock().push(command);
    }

    fn emit(&self, events: Vec<EngineEvent>) {
        if let Some(bus) = &self.bus {
            for event in events {
                bus.emit(event);
            }
        }
    }

    fn set_state(
        &self,
        id: &ManagerId,
        new_state: WalletManagerState,
    ) -> Result<(), EngineError> {
        let event = {
            let mut engine = self.state.lock();
            let manager = engine.live_manager_mut(id)?;
            let old_state = manager.state;
            if old_state == new_state {
                return Ok(());
            }
            manager.state = new_state;
            EngineEvent::Manager {
                manager: manager.clone(),
                event: ManagerEvent::Changed {
                    old_state,
                    new_state,
                },
            }
        };
        self.emit(vec![event]);
        Ok(())
    }

    fn add_wallet(&self, id: &ManagerId, currency: &CurrencyId) -> Result<(), EngineError> {
        let events = {
            let mut engine = self.state.lock();
            let network_id = engine.live_manager_mut(id)?.network.clone();
            let spelled = engine
                .snapshot
                .network(&network_id)
                .ok_or_else(|| EngineError::UnknownNetwork(network_id.clone()))?
                .find_currency(currency)
                .cloned()
                .ok_or_else(|| {
                    EngineError::Rejected(format!("{} is not a currency of {}", currency, network_id))
                })?;

            let manager = engine.live_manager_mut(id)?;
            if manager.has_wallet(&spelled) {
                return Ok(());
            }
            manager.wallets.push(spelled.clone());
            vec![
                EngineEvent::Manager {
                    manager: manager.clone(),
                    event: ManagerEvent::WalletAdded(spelled.clone()),
                },
                EngineEvent::Wallet {
                    manager: id.clone(),
                    currency: spelled,
                    event: WalletEvent::Created,
                },
            ]
        };
        self.emit(events);
        Ok(())
    }
}

impl Default for InMemorySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockchainSystem for InMemorySystem {
    fn snapshot(&self) -> SystemSnapshot {
        self.state.lock().snapshot.clone()
    }

    fn manager_state(&self, manager: &ManagerId) -> Option<WalletManagerState> {
        self.state
            .lock()
            .snapshot
            .manager(manager)
            .map(|m| m.state)
    }

    fn create_wallet_manager(
        &self,
        network: &NetworkId,
        mode: WalletManagerMode,
        currencies: &[CurrencyId],
    ) -> Result<(), EngineError> {
        self.record(TrackerCommand::CreateManager {
            network: network.clone(),
            mode,
            currencies: currencies.to_vec(),
        });
        if !self.apply {
            return Ok(());
        }

        let manager = {
            let mut engine = self.state.lock();
            if engine.snapshot.network(network).is_none() {
                return Err(EngineError::UnknownNetwork(network.clone()));
            }
            if engine.snapshot.manager_for_network(network).is_some() {
                return Err(EngineError::ManagerExists(network.clone()));
            }
            let manager = Self::new_manager(&mut engine, network, WalletManagerState::Created);
            engine.snapshot.managers.push(manager.clone());
            manager
        };
        debug!("[ws-01] Engine created manager {} for {}", manager.id, network);

        self.emit(vec![
            EngineEvent::System(SystemEvent::ManagerAdded(manager.id.clone())),
            EngineEvent::Manager {
                manager: manager.clone(),
                event: ManagerEvent::Created,
            },
        ]);

        for currency in currencies {
            self.add_wallet(&manager.id, currency)?;
        }
        Ok(())
    }

    fn connect(&self, manager: &ManagerId) -> Result<(), EngineError> {
        self.record(TrackerCommand::Connect(manager.clone()));
        if !self.apply {
            return Ok(());
        }
        self.set_state(manager, WalletManagerState::Connected)
    }

    fn disconnect(&self, manager: &ManagerId) -> Result<(), EngineError> {
        self.record(TrackerCommand::Disconnect(manager.clone()));
        if !self.apply {
            return Ok(());
        }
        self.set_state(manager, WalletManagerState::Disconnected)
    }

    fn register_wallet(&self, manager: &ManagerId, currency: &CurrencyId) -> Result<(), EngineError> {
        self.record(TrackerCommand::RegisterWallet {
            manager: manager.clone(),
            currency: currency.clone(),
        });
        if !self.apply {
            return Ok(());
        }
        self.add_wallet(manager, currency)
    }

    fn sync_to_depth(&self, manager: &ManagerId, depth: SyncDepth) -> Result<(), EngineError> {
        self.record(TrackerCommand::SyncToDepth {
            manager: manager.clone(),
            depth,
        });
        if !self.apply {
            return Ok(());
        }

        let snapshot = {
            let mut engine = self.state.lock();
            let live = engine.live_manager_mut(manager)?;
            if live.state != WalletManagerState::Connected {
                return Err(EngineError::InvalidState {
                    manager: manager.clone(),
                    command: "syncToDepth",
                    state: live.state.to_string(),
                });
            }
            live.clone()
        };
        self.emit(vec![EngineEvent::Manager {
            manager: snapshot,
            event: ManagerEvent::SyncStarted,
        }]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_bus::{EventFilter, EventTopic};

    fn eth() -> Network {
        Network::new("eth-main", "Ethereum", true, ["ETH", "BRD"])
    }

    #[test]
    fn test_create_connect_register() {
        let system = InMemorySystem::new();
        system.add_network(eth());
        let net = NetworkId::new("eth-main");

        system
            .create_wallet_manager(&net, WalletManagerMode::ApiOnly, &[CurrencyId::new("eth")])
            .unwrap();
        let manager = system.manager_for_network(&net).unwrap();
        assert_eq!(manager.state, WalletManagerState::Created);
        assert_eq!(manager.wallets[0].as_str(), "ETH");

        system.connect(&manager.id).unwrap();
        system.register_wallet(&manager.id, &"BRD".into()).unwrap();
        system.register_wallet(&manager.id, &"brd".into()).unwrap();

        let manager = system.manager_for_network(&net).unwrap();
        assert_eq!(manager.state, WalletManagerState::Connected);
        assert_eq!(manager.wallets.len(), 2);
        assert_eq!(system.count("registerWallet"), 2);
    }

    #[test]
    fn test_second_manager_for_network_refused() {
        let system = InMemorySystem::new();
        system.add_network(eth());
        let net = NetworkId::new("eth-main");

        system
            .create_wallet_manager(&net, WalletManagerMode::ApiOnly, &[])
            .unwrap();
        assert_eq!(
            system.create_wallet_manager(&net, WalletManagerMode::ApiOnly, &[]),
            Err(EngineError::ManagerExists(net))
        );
    }

    #[test]
    fn test_register_foreign_currency_rejected() {
        let system = InMemorySystem::new();
        system.add_network(eth());
        let id = system.insert_manager(&NetworkId::new("eth-main"), WalletManagerState::Connected, Vec::<CurrencyId>::new());

        assert!(matches!(
            system.register_wallet(&id, &"BTC".into()),
            Err(EngineError::Rejected(_))
        ));
    }

    #[test]
    fn test_recording_engine_keeps_state() {
        let system = InMemorySystem::recording();
        system.add_network(eth());
        let id = system.insert_manager(&NetworkId::new("eth-main"), WalletManagerState::Disconnected, ["ETH"]);

        system.connect(&id).unwrap();
        assert_eq!(system.manager_state(&id), Some(WalletManagerState::Disconnected));
        assert_eq!(system.commands(), vec![TrackerCommand::Connect(id)]);
    }

    #[test]
    fn test_deleted_manager_rejects_commands() {
        let system = InMemorySystem::new();
        system.add_network(eth());
        let id = system.insert_manager(&NetworkId::new("eth-main"), WalletManagerState::Connected, ["ETH"]);

        system.delete_manager(&id).unwrap();
        assert_eq!(system.connect(&id), Err(EngineError::UnknownManager(id.clone())));
        assert!(system.snapshot().manager_for_network(&NetworkId::new("eth-main")).is_none());
    }

    #[test]
    fn test_sync_requires_connected() {
        let system = InMemorySystem::new();
        system.add_network(eth());
        let id = system.insert_manager(&NetworkId::new("eth-main"), WalletManagerState::Disconnected, ["ETH"]);

        assert!(matches!(
            system.sync_to_depth(&id, SyncDepth::FromLastTrustedBlock),
            Err(EngineError::InvalidState { .. })
        ));
        system.connect(&id).unwrap();
        assert!(system.sync_to_depth(&id, SyncDepth::FromLastTrustedBlock).is_ok());
    }

    #[tokio::test]
    async fn test_events_published_on_bus() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Manager]));
        let system = InMemorySystem::with_bus(Arc::clone(&bus));
        system.add_network(eth());

        system
            .create_wallet_manager(&NetworkId::new("eth-main"), WalletManagerMode::ApiOnly, &[])
            .unwrap();

        let event = sub.recv().await.unwrap();
        assert!(matches!(
            event,
            EngineEvent::Manager { event: ManagerEvent::Created, .. }
        ));
    }
}
