//! # Domain Errors
//!
//! Error types for the Wallet Tracker.

use shared_types::{CurrencyId, EngineError, NetworkId};
use thiserror::Error;

/// Wallet tracker error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// A desired currency belongs to no known network.
    #[error("Currency {0} is not offered by any known network")]
    UnresolvableCurrency(CurrencyId),

    /// A network the tracker was asked about is not known to the engine.
    #[error("Unknown network: {0}")]
    UnknownNetwork(NetworkId),

    /// The desired-set feed ended before producing a value.
    #[error("Desired-set feed closed")]
    FeedClosed,

    /// `monitor_tracked_wallets` may only be started once per service.
    #[error("Wallet monitor already started")]
    MonitorAlreadyStarted,

    /// A tracking invariant does not hold.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    /// The engine refused a command.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

impl From<shared_bus::SubscriptionError> for TrackerError {
    fn from(_: shared_bus::SubscriptionError) -> Self {
        TrackerError::FeedClosed
    }
}
