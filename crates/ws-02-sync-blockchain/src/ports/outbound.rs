//! # Outbound Ports
//!
//! The view and the navigator. The engine is reached through
//! `ws_01_wallet_tracker::BlockchainSystem`.

use crate::domain::{NavTarget, SyncEvent};

/// Actions the handler asks the view to perform.
///
/// Implementations marshal onto their own UI thread; calls must not block.
pub trait ViewActions: Send + Sync {
    /// Show the "rescan blockchain?" confirmation prompt.
    fn show_rescan_prompt(&self);
}

/// Handles navigation effects on the handler's behalf.
pub trait NavEffectTransformer: Send + Sync {
    /// Navigate to `target`, optionally answering with an event.
    fn navigate(&self, target: NavTarget) -> Option<SyncEvent>;
}
