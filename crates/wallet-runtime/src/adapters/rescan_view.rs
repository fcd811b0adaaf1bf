//! Log-backed view and navigator for the rescan handler (ws-02).
//!
//! The runtime has no UI: prompts and navigation become log lines.

use tracing::info;
use ws_02_sync_blockchain::{NavEffectTransformer, NavTarget, SyncEvent, ViewActions};

/// `ViewActions` that logs the prompt.
#[derive(Debug, Default)]
pub struct LogView;

impl ViewActions for LogView {
    fn show_rescan_prompt(&self) {
        info!("[runtime] Rescan blockchain? Type `rescan <currency>` to confirm");
    }
}

/// `NavEffectTransformer` that logs the target.
#[derive(Debug, Default)]
pub struct LogNavigator;

impl NavEffectTransformer for LogNavigator {
    fn navigate(&self, target: NavTarget) -> Option<SyncEvent> {
        info!("[runtime] Navigate to {:?}", target);
        None
    }
}
