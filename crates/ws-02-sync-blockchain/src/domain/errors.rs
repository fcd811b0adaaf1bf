//! # Domain Errors

use shared_types::{CurrencyId, EngineError};
use thiserror::Error;

/// Rescan error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// No live manager owns or supports the currency.
    #[error("No wallet manager for {0}")]
    NoManager(CurrencyId),

    /// The engine refused the resync.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}
