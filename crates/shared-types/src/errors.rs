//! # Error Types
//!
//! Errors reported by the blockchain engine when it refuses a request.

use thiserror::Error;

use crate::entities::{ManagerId, NetworkId};

/// Errors returned by engine command primitives.
///
/// Commands are fire-and-forget: an `Err` only means the engine refused to
/// accept the request. Asynchronous failures after acceptance are never
/// reported through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The manager is not known to the engine.
    #[error("Unknown wallet manager: {0}")]
    UnknownManager(ManagerId),

    /// The network is not known to the engine.
    #[error("Unknown network: {0}")]
    UnknownNetwork(NetworkId),

    /// A manager already exists for this network (at most one per network).
    #[error("Wallet manager already exists for network {0}")]
    ManagerExists(NetworkId),

    /// The manager is in a state that cannot accept the command.
    #[error("Wallet manager {manager} cannot {command} while {state}")]
    InvalidState {
        /// Target manager.
        manager: ManagerId,
        /// Command that was refused.
        command: &'static str,
        /// State the manager was in.
        state: String,
    },

    /// The engine has been stopped and accepts no more requests.
    #[error("Engine stopped")]
    Stopped,

    /// Any other refusal.
    #[error("Engine rejected request: {0}")]
    Rejected(String),
}

/// Returned when a wallet manager mode name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown wallet manager mode: {0}")]
pub struct UnknownModeError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_manager_display() {
        let err = EngineError::UnknownManager(ManagerId::new("btc-manager"));
        assert!(err.to_string().contains("btc-manager"));
    }

    #[test]
    fn test_invalid_state_display() {
        let err = EngineError::InvalidState {
            manager: ManagerId::new("eth-manager"),
            command: "connect",
            state: "Deleted".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("connect"));
        assert!(msg.contains("Deleted"));
    }
}
