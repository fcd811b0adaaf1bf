//! # Effects and Events

use serde::{Deserialize, Serialize};
use shared_types::{CurrencyId, ManagerId};

/// Where a navigation effect leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavTarget {
    /// Leave the screen.
    GoBack,
    /// The home screen.
    Home,
    /// A wallet's detail screen.
    WalletDetails(CurrencyId),
    /// The FAQ entry for rescanning.
    Faq(String),
}

/// Effects produced by the rescan screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncEffect {
    /// Navigate elsewhere.
    Nav(NavTarget),
    /// Ask the user to confirm the rescan.
    ShowSyncConfirmation,
    /// Resync the chain behind `currency`.
    SyncBlockchain {
        /// Currency whose manager should resync.
        currency: CurrencyId,
    },
}

/// Events fed back to the rescan screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncEvent {
    /// A resync was requested.
    OnSyncStarted {
        /// Manager asked to resync.
        manager: ManagerId,
    },
    /// The resync could not be requested.
    OnSyncFailed {
        /// Currency the rescan was for.
        currency: CurrencyId,
        /// Why.
        reason: String,
    },
}
