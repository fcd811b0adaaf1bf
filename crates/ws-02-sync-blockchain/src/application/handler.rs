//! # Sync Blockchain Handler
//!
//! Stateless effect handler for the rescan screen.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{SyncEffect, SyncError, SyncEvent};
use crate::ports::{NavEffectTransformer, ViewActions};
use shared_types::{CurrencyId, ManagerId, SyncDepth};
use ws_01_wallet_tracker::BlockchainSystem;

/// Depth every user-requested rescan starts from.
pub const RESCAN_DEPTH: SyncDepth = SyncDepth::FromLastTrustedBlock;

/// Routes rescan-screen effects to the engine, the view and the navigator.
pub struct SyncBlockchainHandler<S, V, N>
where
    S: BlockchainSystem,
    V: ViewActions,
    N: NavEffectTransformer,
{
    system: Arc<S>,
    view: Arc<V>,
    nav: Arc<N>,
}

impl<S, V, N> SyncBlockchainHandler<S, V, N>
where
    S: BlockchainSystem,
    V: ViewActions,
    N: NavEffectTransformer,
{
    /// Create a handler.
    pub fn new(system: Arc<S>, view: Arc<V>, nav: Arc<N>) -> Self {
        Self { system, view, nav }
    }

    /// Handle one effect, returning the event to feed back, if any.
    pub fn handle(&self, effect: SyncEffect) -> Option<SyncEvent> {
        match effect {
            SyncEffect::Nav(target) => {
                debug!("[ws-02] Navigating to {:?}", target);
                self.nav.navigate(target)
            }
            SyncEffect::ShowSyncConfirmation => {
                self.view.show_rescan_prompt();
                None
            }
            SyncEffect::SyncBlockchain { currency } => Some(match self.rescan(&currency) {
                Ok(manager) => SyncEvent::OnSyncStarted { manager },
                Err(e) => {
                    warn!("[ws-02] Rescan of {} failed: {}", currency, e);
                    SyncEvent::OnSyncFailed {
                        currency,
                        reason: e.to_string(),
                    }
                }
            }),
        }
    }

    /// Ask the manager responsible for `currency` to resync from the last
    /// trusted block.
    pub fn rescan(&self, currency: &CurrencyId) -> Result<ManagerId, SyncError> {
        let snapshot = self.system.snapshot();
        let manager = snapshot
            .locate_manager(currency)
            .ok_or_else(|| SyncError::NoManager(currency.clone()))?;

        self.system.sync_to_depth(&manager.id, RESCAN_DEPTH)?;
        info!(
            currency = %currency,
            manager = %manager.id,
            "[ws-02] Rescan requested"
        );
        Ok(manager.id.clone())
    }
}
