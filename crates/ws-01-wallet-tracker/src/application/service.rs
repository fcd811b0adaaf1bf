//! # Wallet Tracker Service
//!
//! Owns the critical section shared by the reconciler and the engine
//! listener, and issues every command the tracker sends to the engine.

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::algorithms::{manager_created_registrations, network_added_decision, plan_pass};
use crate::config::TrackerConfig;
use crate::domain::{IgnoreReason, ListenerOutcome, ReconcileSummary, TrackerCommand, TrackerError};
use crate::ports::{BlockchainSystem, DesiredSetSource, WalletTrackerApi};
use shared_types::{
    DesiredSet, ManagerId, Network, WalletManagerSnapshot, WalletManagerState,
};

/// Wallet Tracker Service - keeps managers aligned with the desired set.
pub struct WalletTrackerService<S: BlockchainSystem, D: DesiredSetSource> {
    /// Configuration.
    config: TrackerConfig,
    /// The engine.
    system: Arc<S>,
    /// Desired-set source.
    desired: Arc<D>,
    /// Held for the whole of a reconcile pass or a listener callback.
    critical_section: Mutex<()>,
    /// Set once `monitor_tracked_wallets` has been called.
    monitor_started: AtomicBool,
}

impl<S: BlockchainSystem, D: DesiredSetSource> WalletTrackerService<S, D> {
    /// Create a new wallet tracker service.
    pub fn new(config: TrackerConfig, system: Arc<S>, desired: Arc<D>) -> Self {
        Self {
            config,
            system,
            desired,
            critical_section: Mutex::new(()),
            monitor_started: AtomicBool::new(false),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// The engine this service drives.
    pub fn system(&self) -> &Arc<S> {
        &self.system
    }

    /// Has the monitor been started?
    pub fn is_monitoring(&self) -> bool {
        self.monitor_started.load(Ordering::SeqCst)
    }

    /// Internal: send one command to the engine.
    fn issue(&self, command: &TrackerCommand) -> Result<(), TrackerError> {
        debug!("[ws-01] Issuing {}", command);
        let result = match command {
            TrackerCommand::CreateManager {
                network,
                mode,
                currencies,
            } => self.system.create_wallet_manager(network, *mode, currencies),
            TrackerCommand::Connect(manager) => self.system.connect(manager),
            TrackerCommand::Disconnect(manager) => self.system.disconnect(manager),
            TrackerCommand::RegisterWallet { manager, currency } => {
                self.system.register_wallet(manager, currency)
            }
            TrackerCommand::SyncToDepth { manager, depth } => {
                self.system.sync_to_depth(manager, *depth)
            }
        };
        Ok(result?)
    }

    /// Internal: live re-check before a reconciler connect.
    ///
    /// The listener may have connected the manager since the snapshot was
    /// taken, and a manager is connected at most once per pass.
    fn connect_needed(&self, manager: &ManagerId, connected: &HashSet<ManagerId>) -> bool {
        if connected.contains(manager) {
            return false;
        }
        match self.system.manager_state(manager) {
            Some(state) if state.is_tracked() => {
                debug!("[ws-01] Manager {} already {}, not connecting", manager, state);
                false
            }
            Some(WalletManagerState::Deleted) | None => {
                debug!("[ws-01] Manager {} is gone, not connecting", manager);
                false
            }
            Some(_) => true,
        }
    }

    /// Internal: body of a pass. Caller holds the critical section.
    fn run_pass(&self, pass_id: Uuid, desired: &DesiredSet) -> ReconcileSummary {
        let snapshot = self.system.snapshot();
        let plan = plan_pass(desired, &snapshot, self.config.manager_mode);

        info!(
            "[ws-01] Reconciling {} desired currencies against {} managers",
            desired.len(),
            snapshot.live_managers().count()
        );

        let mut summary = ReconcileSummary::new(pass_id);
        let mut connected = HashSet::new();

        for command in &plan.commands {
            if let TrackerCommand::Connect(manager) = command {
                if !self.connect_needed(manager, &connected) {
                    continue;
                }
                connected.insert(manager.clone());
            }

            summary.record(command);
            if let Err(e) = self.issue(command) {
                summary.refused += 1;
                warn!("[ws-01] Engine refused {}: {}", command, e);
            }
        }

        for currency in &plan.unresolved {
            error!(
                "[ws-01] {}, skipping",
                TrackerError::UnresolvableCurrency(currency.clone())
            );
        }
        summary.skipped = plan.unresolved;

        info!(
            disconnects = summary.disconnects,
            connects = summary.connects,
            creates = summary.creates,
            registrations = summary.registrations,
            skipped = summary.skipped.len(),
            "[ws-01] Reconcile pass complete"
        );
        summary
    }

    /// Internal: read the desired set for a listener callback.
    async fn current_desired(&self) -> Result<DesiredSet, TrackerError> {
        self.desired.first().await.map_err(|e| {
            warn!("[ws-01] Cannot read desired set: {}", e);
            e
        })
    }
}

impl<S, D> WalletTrackerService<S, D>
where
    S: BlockchainSystem + 'static,
    D: DesiredSetSource + 'static,
{
    /// Reconcile on every desired-set emission.
    ///
    /// Each emission runs one full pass. The stream yields the pass summary
    /// and ends when the desired-set source closes. May be started once.
    pub fn monitor_tracked_wallets(
        self: &Arc<Self>,
    ) -> Result<BoxStream<'static, ReconcileSummary>, TrackerError> {
        if self.monitor_started.swap(true, Ordering::SeqCst) {
            return Err(TrackerError::MonitorAlreadyStarted);
        }
        info!("[ws-01] Monitoring tracked wallets");

        let service = Arc::clone(self);
        Ok(self
            .desired
            .subscribe()
            .then(move |desired| {
                let service = Arc::clone(&service);
                async move { service.reconcile(desired).await }
            })
            .boxed())
    }
}

#[async_trait]
impl<S: BlockchainSystem, D: DesiredSetSource> WalletTrackerApi for WalletTrackerService<S, D> {
    async fn reconcile(&self, desired: DesiredSet) -> ReconcileSummary {
        let pass_id = Uuid::new_v4();
        let span = info_span!("reconcile_pass", %pass_id);
        async move {
            let _guard = self.critical_section.lock().await;
            self.run_pass(pass_id, &desired)
        }
        .instrument(span)
        .await
    }

    async fn on_manager_created(&self, manager: WalletManagerSnapshot) -> ListenerOutcome {
        let _guard = self.critical_section.lock().await;
        debug!("[ws-01] Wallet manager created: {}", manager.id);

        let Ok(desired) = self.current_desired().await else {
            return ListenerOutcome::Ignored(IgnoreReason::FeedClosed);
        };

        let snapshot = self.system.snapshot();
        let Some(network) = snapshot.network(&manager.network) else {
            warn!(
                "[ws-01] Manager {}: {}",
                manager.id,
                TrackerError::UnknownNetwork(manager.network.clone())
            );
            return ListenerOutcome::Ignored(IgnoreReason::UnknownNetwork);
        };
        if !desired.intersects(network) {
            debug!("[ws-01] No desired currency on {}, leaving {} alone", network.id, manager.id);
            return ListenerOutcome::Ignored(IgnoreReason::NoDesiredCurrency);
        }
        let Some(live) = snapshot
            .manager(&manager.id)
            .filter(|m| m.state != WalletManagerState::Deleted)
        else {
            debug!("[ws-01] Manager {} is gone", manager.id);
            return ListenerOutcome::Ignored(IgnoreReason::ManagerGone);
        };

        let already_connected = live.state == WalletManagerState::Connected;
        if !already_connected {
            let connect = TrackerCommand::Connect(live.id.clone());
            if let Err(e) = self.issue(&connect) {
                warn!("[ws-01] Engine refused {}: {}", connect, e);
            }
        }

        let mut registered = Vec::new();
        for currency in manager_created_registrations(&desired, network) {
            let register = TrackerCommand::RegisterWallet {
                manager: live.id.clone(),
                currency: currency.clone(),
            };
            match self.issue(&register) {
                Ok(()) => registered.push(currency),
                Err(e) => warn!("[ws-01] Engine refused {}: {}", register, e),
            }
        }

        if already_connected {
            ListenerOutcome::AlreadyConnected {
                manager: live.id.clone(),
                registered,
            }
        } else {
            ListenerOutcome::Connected {
                manager: live.id.clone(),
                registered,
            }
        }
    }

    async fn on_network_added(&self, network: Network) -> ListenerOutcome {
        let _guard = self.critical_section.lock().await;
        debug!("[ws-01] Network added: {}", network.id);

        let Ok(desired) = self.current_desired().await else {
            return ListenerOutcome::Ignored(IgnoreReason::FeedClosed);
        };

        let snapshot = self.system.snapshot();
        if let Err(reason) =
            network_added_decision(&desired, &network, self.config.is_mainnet, &snapshot)
        {
            debug!("[ws-01] Not creating a manager for {}: {:?}", network.id, reason);
            return ListenerOutcome::Ignored(reason);
        }

        let create = TrackerCommand::CreateManager {
            network: network.id.clone(),
            mode: self.config.manager_mode,
            currencies: Vec::new(),
        };
        if let Err(e) = self.issue(&create) {
            warn!("[ws-01] Engine refused {}: {}", create, e);
        }
        info!("[ws-01] Requested wallet manager for {}", network.id);
        ListenerOutcome::ManagerRequested(network.id)
    }
}
