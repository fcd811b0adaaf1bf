//! # Wallet Runtime
//!
//! Owns the engine, the bus, the desired-set feed, the tracker and every
//! task the process runs.
//!
//! ## Startup Sequence
//!
//! 1. Route bus events to the tracker listener
//! 2. Publish the configured desired set
//! 3. Start the monitor (exactly once)
//! 4. Let the engine discover its networks

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::StreamExt;
use parking_lot::Mutex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::adapters::{LogNavigator, LogView};
use crate::config::RuntimeConfig;
use crate::control::ControlCommand;
use crate::networks::well_known_networks;
use crate::wiring::EventRouter;
use shared_bus::{DesiredSetFeed, EngineEvent, EventPublisher, InMemoryEventBus, SystemEvent};
use shared_types::{CurrencyId, DesiredSet, SystemSnapshot};
use ws_01_wallet_tracker::{BlockchainSystem, InMemorySystem, TrackerListener, WalletTrackerService};
use ws_02_sync_blockchain::{SyncBlockchainHandler, SyncEffect, SyncEvent};

/// The tracker as wired by the runtime.
pub type Tracker = WalletTrackerService<InMemorySystem, DesiredSetFeed>;

type RescanHandler = SyncBlockchainHandler<InMemorySystem, LogView, LogNavigator>;

/// The wallet runtime.
pub struct WalletRuntime {
    config: RuntimeConfig,
    bus: Arc<InMemoryEventBus>,
    system: Arc<InMemorySystem>,
    feed: Arc<DesiredSetFeed>,
    tracker: Arc<Tracker>,
    rescan: RescanHandler,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl WalletRuntime {
    /// Create a runtime. Nothing runs until [`WalletRuntime::start`].
    pub fn new(config: RuntimeConfig) -> Self {
        info!("[runtime] Creating wallet runtime");

        let bus = Arc::new(InMemoryEventBus::with_capacity(config.bus_capacity));
        let system = Arc::new(InMemorySystem::with_bus(Arc::clone(&bus)));
        let feed = Arc::new(DesiredSetFeed::new());
        let tracker = Arc::new(WalletTrackerService::new(
            config.tracker.clone(),
            Arc::clone(&system),
            Arc::clone(&feed),
        ));
        let rescan = SyncBlockchainHandler::new(
            Arc::clone(&system),
            Arc::new(LogView),
            Arc::new(LogNavigator),
        );
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            config,
            bus,
            system,
            feed,
            tracker,
            rescan,
            shutdown_tx,
            shutdown_rx,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Start routing, monitoring and network discovery.
    pub async fn start(&self) -> Result<()> {
        info!("===========================================");
        info!("  Wallet-Sync Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!(
            "  Network: {}  Mode: {:?}",
            if self.config.tracker.is_mainnet { "mainnet" } else { "testnet" },
            self.config.tracker.manager_mode
        );
        info!("===========================================");

        // Step 1: engine events -> tracker listener
        let listener = Arc::new(TrackerListener::new(
            Arc::clone(&self.tracker),
            Handle::current(),
        ));
        let router = EventRouter::new(self.bus.as_ref(), listener);
        let shutdown = self.shutdown_rx.clone();
        self.tasks.lock().push(tokio::spawn(async move {
            let routed = router.run(shutdown).await;
            debug!(routed, "[runtime] Event router stopped");
        }));

        self.bus
            .publish(EngineEvent::System(SystemEvent::Created))
            .await;

        // Step 2: initial desired set
        self.feed.publish(self.config.enabled_wallets.clone());

        // Step 3: monitor
        let mut passes = self
            .tracker
            .monitor_tracked_wallets()
            .context("Failed to start wallet monitor")?;
        let mut shutdown = self.shutdown_rx.clone();
        self.tasks.lock().push(tokio::spawn(async move {
            loop {
                tokio::select! {
                    pass = passes.next() => {
                        let Some(summary) = pass else {
                            info!("[ws-01] Desired-set feed closed");
                            break;
                        };
                        debug!(pass_id = %summary.pass_id, "[ws-01] {} commands issued", summary.commands_issued());
                    }
                    _ = shutdown.changed() => {
                        info!("[ws-01] Shutdown signal received");
                        break;
                    }
                }
            }
        }));

        // Step 4: discovery
        for network in well_known_networks(self.config.tracker.is_mainnet) {
            self.system.add_network(network);
        }

        info!(
            "[runtime] Started with wallets {:?}",
            self.config
                .enabled_wallets
                .iter()
                .map(CurrencyId::as_str)
                .collect::<Vec<_>>()
        );
        Ok(())
    }

    /// Replace the desired set.
    pub fn publish_desired(&self, desired: DesiredSet) {
        self.feed.publish(desired);
    }

    /// Resync the manager behind `currency`.
    pub fn rescan(&self, currency: CurrencyId) -> Option<SyncEvent> {
        self.rescan.handle(SyncEffect::SyncBlockchain { currency })
    }

    /// Current engine state.
    pub fn snapshot(&self) -> SystemSnapshot {
        self.system.snapshot()
    }

    /// The engine.
    pub fn system(&self) -> &Arc<InMemorySystem> {
        &self.system
    }

    /// The event bus.
    pub fn bus(&self) -> &Arc<InMemoryEventBus> {
        &self.bus
    }

    /// Execute one console command.
    pub fn execute(&self, command: ControlCommand) {
        match command {
            ControlCommand::Wallets(desired) => self.publish_desired(desired),
            ControlCommand::RescanPrompt => {
                self.rescan.handle(SyncEffect::ShowSyncConfirmation);
            }
            ControlCommand::Rescan(currency) => {
                if let Some(event) = self.rescan(currency) {
                    info!("[runtime] {:?}", event);
                }
            }
            ControlCommand::Status => {
                info!(
                    "[runtime] {} engine events published",
                    self.bus.events_published()
                );
                for manager in self.snapshot().live_managers() {
                    info!(
                        "[runtime] {} ({}) {} wallets={:?}",
                        manager.id,
                        manager.network,
                        manager.state,
                        manager.wallets.iter().map(CurrencyId::as_str).collect::<Vec<_>>()
                    );
                }
            }
            ControlCommand::Quit => self.request_shutdown(),
        }
    }

    /// Read console commands from `reader` until shutdown or end of input.
    pub fn spawn_console<R>(self: &Arc<Self>, reader: R) -> JoinHandle<()>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let runtime = Arc::clone(self);
        let mut shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            let mut lines = reader.lines();
            loop {
                tokio::select! {
                    line = lines.next_line() => match line {
                        Ok(Some(line)) => match ControlCommand::parse(&line) {
                            Ok(Some(command)) => runtime.execute(command),
                            Ok(None) => {}
                            Err(e) => warn!("[runtime] {}", e),
                        },
                        Ok(None) => {
                            debug!("[runtime] Console input closed");
                            break;
                        }
                        Err(e) => {
                            warn!("[runtime] Console read failed: {}", e);
                            break;
                        }
                    },
                    _ = shutdown.changed() => break,
                }
            }
        })
    }

    /// Signal every task to stop.
    pub fn request_shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Resolve once shutdown has been requested.
    pub async fn wait_for_shutdown(&self) {
        let mut shutdown = self.shutdown_rx.clone();
        while !*shutdown.borrow_and_update() {
            if shutdown.changed().await.is_err() {
                break;
            }
        }
    }

    /// Shut down gracefully.
    ///
    /// ## Shutdown Sequence
    ///
    /// 1. Signal shutdown to all tasks
    /// 2. Wait up to the grace period for them to finish
    /// 3. Abort whatever is still running
    pub async fn shutdown(&self) {
        info!("[runtime] Initiating graceful shutdown...");
        self.request_shutdown();

        let tasks: Vec<JoinHandle<()>> = std::mem::take(&mut *self.tasks.lock());
        let aborts: Vec<_> = tasks.iter().map(JoinHandle::abort_handle).collect();

        let grace = self.config.shutdown_grace;
        if tokio::time::timeout(grace, futures::future::join_all(tasks))
            .await
            .is_err()
        {
            warn!("[runtime] Tasks still running after {:?}, aborting", grace);
            for abort in aborts {
                abort.abort();
            }
        }

        info!("[runtime] Shutdown complete");
    }
}
