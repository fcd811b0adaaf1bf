//! # Domain Invariants
//!
//! Properties that hold once the engine has applied a reconciliation pass.

use super::errors::TrackerError;
use super::value_objects::TrackerCommand;
use shared_types::{DesiredSet, SystemSnapshot};
use std::collections::HashSet;

/// Invariant: a live manager is tracked iff its network offers a desired
/// currency.
///
/// Deleted managers are ignored.
pub fn invariant_tracked_iff_desired(
    desired: &DesiredSet,
    snapshot: &SystemSnapshot,
) -> Result<(), TrackerError> {
    for manager in snapshot.live_managers() {
        let wanted = snapshot
            .network_of(manager)
            .map(|network| desired.intersects(network))
            .unwrap_or(false);

        if manager.is_tracked() != wanted {
            return Err(TrackerError::InvariantViolation(format!(
                "manager {} is {} but desired={}",
                manager.id, manager.state, wanted
            )));
        }
    }
    Ok(())
}

/// Invariant: at most one live manager per network.
pub fn invariant_one_manager_per_network(snapshot: &SystemSnapshot) -> Result<(), TrackerError> {
    let mut seen = HashSet::new();
    for manager in snapshot.live_managers() {
        if !seen.insert(&manager.network) {
            return Err(TrackerError::InvariantViolation(format!(
                "network {} has more than one manager",
                manager.network
            )));
        }
    }
    Ok(())
}

/// Invariant: every wallet belongs to a currency of its manager's network.
pub fn invariant_wallets_within_network(snapshot: &SystemSnapshot) -> Result<(), TrackerError> {
    for manager in snapshot.live_managers() {
        let Some(network) = snapshot.network_of(manager) else {
            continue;
        };
        if let Some(stray) = manager
            .wallets
            .iter()
            .find(|c| !network.contains_currency(c))
        {
            return Err(TrackerError::InvariantViolation(format!(
                "wallet {} on manager {} is not a currency of {}",
                stray, manager.id, network.id
            )));
        }
    }
    Ok(())
}

/// Invariant: within a pass, every disconnect precedes every other command.
pub fn invariant_disconnects_first(commands: &[TrackerCommand]) -> bool {
    let first_other = commands
        .iter()
        .position(|c| !c.is_disconnect())
        .unwrap_or(commands.len());
    commands[first_other..].iter().all(|c| !c.is_disconnect())
}
