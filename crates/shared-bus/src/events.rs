//! # Engine Events
//!
//! Every notification the blockchain engine can emit, grouped by family.
//! Each family is a closed enum; consumers match the variants they act on
//! and fall through to a no-op for the rest.

use serde::{Deserialize, Serialize};
use shared_types::{
    CurrencyId, ManagerId, Network, NetworkId, SyncDepth, WalletManagerSnapshot,
    WalletManagerState,
};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// System-level event.
    System(SystemEvent),

    /// Wallet manager event. Carries the manager as observed when the event
    /// was emitted.
    Manager {
        /// The manager the event is about.
        manager: WalletManagerSnapshot,
        /// What happened.
        event: ManagerEvent,
    },

    /// Wallet-level event.
    Wallet {
        /// Owning manager.
        manager: ManagerId,
        /// Wallet currency.
        currency: CurrencyId,
        /// What happened.
        event: WalletEvent,
    },

    /// Transfer-level event.
    Transfer {
        /// Owning manager.
        manager: ManagerId,
        /// Wallet currency.
        currency: CurrencyId,
        /// Transfer identifier.
        transfer: String,
        /// What happened.
        event: TransferEvent,
    },

    /// Generic network event.
    Network {
        /// The network the event is about.
        network: NetworkId,
        /// What happened.
        event: NetworkEvent,
    },
}

// =========================================================================
// EVENT FAMILIES
// =========================================================================

/// System events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemEvent {
    /// The system itself was created.
    Created,
    /// A network was discovered.
    NetworkAdded(Network),
    /// A wallet manager was added to the system.
    ManagerAdded(ManagerId),
    /// Network discovery finished.
    DiscoveredNetworks(Vec<NetworkId>),
}

/// Wallet manager events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManagerEvent {
    /// The manager was created.
    Created,
    /// The manager changed state.
    Changed {
        /// State before the change.
        old_state: WalletManagerState,
        /// State after the change.
        new_state: WalletManagerState,
    },
    /// The manager was deleted.
    Deleted,
    /// A wallet was registered.
    WalletAdded(CurrencyId),
    /// A wallet changed.
    WalletChanged(CurrencyId),
    /// A wallet was removed.
    WalletDeleted(CurrencyId),
    /// Sync started.
    SyncStarted,
    /// Sync progressed.
    SyncProgress {
        /// Percent complete, 0..=100.
        percent_complete: u8,
    },
    /// Sync stopped.
    SyncStopped {
        /// Why it stopped.
        reason: String,
    },
    /// The engine recommends a resync.
    SyncRecommended {
        /// Recommended depth.
        depth: SyncDepth,
    },
    /// A new block height was observed.
    BlockUpdated {
        /// New height.
        height: u64,
    },
}

/// Wallet events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletEvent {
    /// Wallet created.
    Created,
    /// Wallet changed.
    Changed,
    /// Balance updated.
    BalanceUpdated,
    /// A transfer was added.
    TransferAdded(String),
    /// A transfer changed.
    TransferChanged(String),
    /// A transfer was removed.
    TransferDeleted(String),
    /// Fee basis updated.
    FeeBasisUpdated,
    /// Wallet deleted.
    Deleted,
}

/// Transfer events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferEvent {
    /// Transfer created.
    Created,
    /// Transfer changed.
    Changed,
    /// Transfer deleted.
    Deleted,
}

/// Network events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkEvent {
    /// Network created.
    Created,
    /// Network fees updated.
    FeesUpdated,
}

impl EngineEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::System(_) => EventTopic::System,
            Self::Manager { .. } => EventTopic::Manager,
            Self::Wallet { .. } => EventTopic::Wallet,
            Self::Transfer { .. } => EventTopic::Transfer,
            Self::Network { .. } => EventTopic::Network,
        }
    }

    /// Short name for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::System(SystemEvent::Created) => "SystemCreated",
            Self::System(SystemEvent::NetworkAdded(_)) => "NetworkAdded",
            Self::System(SystemEvent::ManagerAdded(_)) => "ManagerAdded",
            Self::System(SystemEvent::DiscoveredNetworks(_)) => "DiscoveredNetworks",
            Self::Manager {
                event: ManagerEvent::Created,
                ..
            } => "ManagerCreated",
            Self::Manager { .. } => "ManagerEvent",
            Self::Wallet { .. } => "WalletEvent",
            Self::Transfer { .. } => "TransferEvent",
            Self::Network { .. } => "NetworkEvent",
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// System events.
    System,
    /// Wallet manager events.
    Manager,
    /// Wallet events.
    Wallet,
    /// Transfer events.
    Transfer,
    /// Network events.
    Network,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &EngineEvent) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network_added() -> EngineEvent {
        EngineEvent::System(SystemEvent::NetworkAdded(Network::new(
            "bitcoin-mainnet",
            "Bitcoin",
            true,
            ["bitcoin-mainnet:__native__"],
        )))
    }

    fn wallet_event() -> EngineEvent {
        EngineEvent::Wallet {
            manager: ManagerId::new("m-btc"),
            currency: CurrencyId::new("bitcoin-mainnet:__native__"),
            event: WalletEvent::BalanceUpdated,
        }
    }

    #[test]
    fn test_event_topic_mapping() {
        assert_eq!(network_added().topic(), EventTopic::System);
        assert_eq!(wallet_event().topic(), EventTopic::Wallet);
    }

    #[test]
    fn test_event_kind() {
        assert_eq!(network_added().kind(), "NetworkAdded");
        assert_eq!(wallet_event().kind(), "WalletEvent");
    }

    #[test]
    fn test_filter_all() {
        let filter = EventFilter::all();
        assert!(filter.matches(&network_added()));
        assert!(filter.matches(&wallet_event()));
    }

    #[test]
    fn test_filter_by_topic() {
        let filter = EventFilter::topics(vec![EventTopic::System, EventTopic::Manager]);
        assert!(filter.matches(&network_added()));
        assert!(!filter.matches(&wallet_event()));
    }

    #[test]
    fn test_filter_explicit_all_topic() {
        let filter = EventFilter::topics(vec![EventTopic::All]);
        assert!(filter.matches(&wallet_event()));
    }
}
