//! Test wiring for the engine, the bus and the tracker.

use std::sync::Arc;

use shared_bus::{DesiredSetFeed, EventFilter, InMemoryEventBus, Subscription};
use shared_types::{DesiredSet, Network};
use tokio::runtime::Handle;
use ws_01_wallet_tracker::{
    InMemorySystem, SystemListener, TrackerConfig, TrackerListener, WalletTrackerService,
};

/// Tracker over the in-memory engine.
pub type Tracker = WalletTrackerService<InMemorySystem, DesiredSetFeed>;

/// Everything a flow needs, wired the way the runtime wires it.
pub struct Harness {
    pub bus: Arc<InMemoryEventBus>,
    pub system: Arc<InMemorySystem>,
    pub feed: Arc<DesiredSetFeed>,
    pub tracker: Arc<Tracker>,
    pub listener: TrackerListener<InMemorySystem, DesiredSetFeed>,
    events: Subscription,
}

impl Harness {
    /// Wire a harness. Must be called inside a tokio runtime.
    pub fn new(config: TrackerConfig, desired: DesiredSet) -> Self {
        let bus = Arc::new(InMemoryEventBus::new());
        let events = bus.subscribe(EventFilter::all());
        let system = Arc::new(InMemorySystem::with_bus(Arc::clone(&bus)));
        let feed = Arc::new(DesiredSetFeed::with_initial(desired));
        let tracker = Arc::new(WalletTrackerService::new(
            config,
            Arc::clone(&system),
            Arc::clone(&feed),
        ));
        let listener = TrackerListener::new(Arc::clone(&tracker), Handle::current());

        Self {
            bus,
            system,
            feed,
            tracker,
            listener,
            events,
        }
    }

    /// Discover `network` without dispatching the resulting event.
    pub fn discover(&self, network: Network) {
        self.system.add_network(network);
    }

    /// Dispatch every pending event to the listener, waiting for each
    /// spawned callback, until the bus is quiet. Returns events seen.
    pub async fn pump(&mut self) -> usize {
        let mut seen = 0;
        while let Ok(Some(event)) = self.events.try_recv() {
            seen += 1;
            if let Some(task) = self.listener.handle_event(&event) {
                let _ = task.await;
            }
        }
        seen
    }

    /// Drop pending events without dispatching them.
    pub fn drain(&mut self) -> usize {
        let mut dropped = 0;
        while let Ok(Some(_)) = self.events.try_recv() {
            dropped += 1;
        }
        dropped
    }
}

/// Bitcoin testnet.
pub fn btc_testnet() -> Network {
    Network::new("bitcoin-testnet", "Bitcoin Testnet", false, ["BTC"])
}

/// Ethereum testnet carrying one token.
pub fn eth_testnet() -> Network {
    Network::new("ethereum-ropsten", "Ethereum Ropsten", false, ["ETH", "BRD"])
}

/// Bitcoin mainnet.
pub fn btc_mainnet() -> Network {
    Network::new("bitcoin-mainnet", "Bitcoin", true, ["BTC"])
}
