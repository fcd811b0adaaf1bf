//! # Reconcile Planning
//!
//! Turns (desired set, system snapshot) into the ordered command list of one
//! reconciliation pass.
//!
//! ## Algorithm
//!
//! 1. Disconnect every tracked manager whose network offers no desired
//!    currency.
//! 2. For each desired currency, in user order:
//!    - manager found: connect it unless tracked (once per pass), then
//!      register the wallet unless it already exists.
//!    - no manager, network found: request a manager. Later currencies of the
//!      same network join the pending request instead of a second one.
//!    - neither: skip.

use crate::domain::TrackerCommand;
use shared_types::{
    CurrencyId, DesiredSet, ManagerId, NetworkId, SystemSnapshot, WalletManagerMode,
};
use std::collections::{HashMap, HashSet};

/// Ordered commands for one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// Commands in issue order. Disconnects come first.
    pub commands: Vec<TrackerCommand>,
    /// Desired currencies no known network offers.
    pub unresolved: Vec<CurrencyId>,
}

impl ReconcilePlan {
    /// True when the plan issues nothing.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Managers to disconnect: tracked, and no desired currency on their network.
///
/// A manager whose network is unknown offers no currency and is disconnected
/// if tracked.
pub fn plan_disconnects(desired: &DesiredSet, snapshot: &SystemSnapshot) -> Vec<ManagerId> {
    let mut seen = HashSet::new();
    snapshot
        .live_managers()
        .filter(|m| m.is_tracked())
        .filter(|m| {
            !snapshot
                .network_of(m)
                .is_some_and(|network| desired.intersects(network))
        })
        .filter(|m| seen.insert(m.id.clone()))
        .map(|m| m.id.clone())
        .collect()
}

/// Plan a full reconciliation pass.
pub fn plan_pass(
    desired: &DesiredSet,
    snapshot: &SystemSnapshot,
    mode: WalletManagerMode,
) -> ReconcilePlan {
    let mut plan = ReconcilePlan {
        commands: plan_disconnects(desired, snapshot)
            .into_iter()
            .map(TrackerCommand::Disconnect)
            .collect(),
        unresolved: Vec::new(),
    };

    let mut connected: HashSet<ManagerId> = HashSet::new();
    let mut pending_creates: HashMap<NetworkId, usize> = HashMap::new();

    for currency in desired.iter() {
        if let Some(manager) = snapshot.locate_manager(currency) {
            if !manager.is_tracked() && connected.insert(manager.id.clone()) {
                plan.commands
                    .push(TrackerCommand::Connect(manager.id.clone()));
            }
            if !manager.has_wallet(currency) {
                let spelled = snapshot
                    .network_of(manager)
                    .and_then(|n| n.find_currency(currency))
                    .unwrap_or(currency)
                    .clone();
                plan.commands.push(TrackerCommand::RegisterWallet {
                    manager: manager.id.clone(),
                    currency: spelled,
                });
            }
            continue;
        }

        let Some(network) = snapshot.network_for_currency(currency) else {
            plan.unresolved.push(currency.clone());
            continue;
        };
        let spelled = network
            .find_currency(currency)
            .unwrap_or(currency)
            .clone();

        match pending_creates.get(&network.id) {
            Some(&index) => {
                if let Some(TrackerCommand::CreateManager { currencies, .. }) =
                    plan.commands.get_mut(index)
                {
                    currencies.push(spelled);
                }
            }
            None => {
                pending_creates.insert(network.id.clone(), plan.commands.len());
                plan.commands.push(TrackerCommand::CreateManager {
                    network: network.id.clone(),
                    mode,
                    currencies: vec![spelled],
                });
            }
        }
    }

    plan
}
