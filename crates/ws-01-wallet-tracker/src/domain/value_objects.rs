//! # Value Objects
//!
//! Commands the tracker issues, and what a pass or a listener callback did.

use serde::{Deserialize, Serialize};
use shared_types::{CurrencyId, ManagerId, NetworkId, SyncDepth, WalletManagerMode};
use std::fmt;
use uuid::Uuid;

/// A mutating request against the engine.
///
/// The reconciler plans these, the service issues them, and the in-memory
/// engine records them in the order received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackerCommand {
    /// Create a manager for a network, pre-registering `currencies`.
    CreateManager {
        /// Target network.
        network: NetworkId,
        /// Manager mode.
        mode: WalletManagerMode,
        /// Currencies registered at creation.
        currencies: Vec<CurrencyId>,
    },
    /// Connect a manager.
    Connect(ManagerId),
    /// Disconnect a manager.
    Disconnect(ManagerId),
    /// Register a wallet for a currency on a manager.
    RegisterWallet {
        /// Owning manager.
        manager: ManagerId,
        /// Wallet currency.
        currency: CurrencyId,
    },
    /// Re-sync a manager's chain.
    SyncToDepth {
        /// Manager to rescan.
        manager: ManagerId,
        /// How far back to go.
        depth: SyncDepth,
    },
}

impl TrackerCommand {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            TrackerCommand::CreateManager { .. } => "createWalletManager",
            TrackerCommand::Connect(_) => "connect",
            TrackerCommand::Disconnect(_) => "disconnect",
            TrackerCommand::RegisterWallet { .. } => "registerWallet",
            TrackerCommand::SyncToDepth { .. } => "syncToDepth",
        }
    }

    /// Returns true for disconnect commands.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, TrackerCommand::Disconnect(_))
    }
}

impl fmt::Display for TrackerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerCommand::CreateManager {
                network,
                currencies,
                ..
            } => write!(f, "createWalletManager({}, {:?})", network, currencies),
            TrackerCommand::Connect(m) => write!(f, "connect({})", m),
            TrackerCommand::Disconnect(m) => write!(f, "disconnect({})", m),
            TrackerCommand::RegisterWallet { manager, currency } => {
                write!(f, "registerWallet({}, {})", manager, currency)
            }
            TrackerCommand::SyncToDepth { manager, depth } => {
                write!(f, "syncToDepth({}, {:?})", manager, depth)
            }
        }
    }
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Correlates log lines of the pass.
    pub pass_id: Uuid,
    /// Disconnect commands issued.
    pub disconnects: usize,
    /// Connect commands issued.
    pub connects: usize,
    /// Manager creations requested.
    pub creates: usize,
    /// Wallet registrations issued.
    pub registrations: usize,
    /// Commands the engine refused.
    pub refused: usize,
    /// Desired currencies no known network offers.
    pub skipped: Vec<CurrencyId>,
}

impl ReconcileSummary {
    /// Empty summary for a new pass.
    pub fn new(pass_id: Uuid) -> Self {
        Self {
            pass_id,
            disconnects: 0,
            connects: 0,
            creates: 0,
            registrations: 0,
            refused: 0,
            skipped: Vec::new(),
        }
    }

    /// Total commands issued.
    pub fn commands_issued(&self) -> usize {
        self.disconnects + self.connects + self.creates + self.registrations
    }

    /// True when the pass changed nothing.
    pub fn is_noop(&self) -> bool {
        self.commands_issued() == 0
    }

    pub(crate) fn record(&mut self, command: &TrackerCommand) {
        match command {
            TrackerCommand::CreateManager { .. } => self.creates += 1,
            TrackerCommand::Connect(_) => self.connects += 1,
            TrackerCommand::Disconnect(_) => self.disconnects += 1,
            TrackerCommand::RegisterWallet { .. } => self.registrations += 1,
            TrackerCommand::SyncToDepth { .. } => {}
        }
    }
}

/// Why a listener callback did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The network's mainnet flag differs from the configured one.
    MainnetMismatch,
    /// No desired currency belongs to the network.
    NoDesiredCurrency,
    /// The manager's network is not known.
    UnknownNetwork,
    /// The network already has a live manager.
    ManagerExists,
    /// The manager was deleted or vanished before it could be handled.
    ManagerGone,
    /// The desired-set feed is closed.
    FeedClosed,
}

/// What a listener callback did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerOutcome {
    /// A newly created manager was connected.
    Connected {
        /// Connected manager.
        manager: ManagerId,
        /// Wallets registered afterwards.
        registered: Vec<CurrencyId>,
    },
    /// The manager was already connected; only wallets were registered.
    AlreadyConnected {
        /// The manager.
        manager: ManagerId,
        /// Wallets registered.
        registered: Vec<CurrencyId>,
    },
    /// A manager was requested for a discovered network.
    ManagerRequested(NetworkId),
    /// Nothing to do.
    Ignored(IgnoreReason),
}
