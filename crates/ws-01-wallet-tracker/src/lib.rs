//! # WS-01 Wallet Tracker
//!
//! Keeps the engine's wallet managers in line with the currencies the user
//! wants active.
//!
//! **Subsystem ID:** 1  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Two actors mutate wallet manager state:
//! - The **reconciler** runs one pass per desired-set emission: disconnect
//!   managers nobody wants, then connect/create/register for every desired
//!   currency.
//! - The **event listener** reacts to `ManagerCreated` and `NetworkAdded`
//!   engine events with a narrow one-shot slice of the same work.
//!
//! Both share a single critical section, so at most one of them reads
//! manager state and issues commands at any time.
//!
//! ## Module Structure
//!
//! ```text
//! ws-01-wallet-tracker/
//! ├── domain/          # Commands, summaries, outcomes, errors, invariants
//! ├── algorithms/      # Pure planning: reconcile pass, event slices
//! ├── ports/           # API traits (inbound) + dependency traits (outbound)
//! ├── application/     # WalletTrackerService + engine listener
//! ├── adapters/        # In-memory engine, desired-set feed binding
//! └── config.rs        # TrackerConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::InMemorySystem;
pub use algorithms::{plan_disconnects, plan_pass, ReconcilePlan};
pub use application::{TrackerListener, WalletTrackerService};
pub use config::TrackerConfig;
pub use domain::{
    invariant_disconnects_first, invariant_one_manager_per_network, invariant_tracked_iff_desired,
    invariant_wallets_within_network, IgnoreReason, ListenerOutcome, ReconcileSummary,
    TrackerCommand, TrackerError,
};
pub use ports::{BlockchainSystem, DesiredSetSource, SystemListener, WalletTrackerApi};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
