//! # WS-02 Sync Blockchain
//!
//! Effect handler behind the "rescan blockchain" screen.
//!
//! **Subsystem ID:** 2  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! Effects in, events out. The handler holds no state: a `SyncBlockchain`
//! effect locates the manager responsible for the currency and asks it to
//! resync from the last trusted block. Confirmation prompts and navigation
//! are delegated to injected collaborators.
//!
//! ## Module Structure
//!
//! ```text
//! ws-02-sync-blockchain/
//! ├── domain/          # Effects, events, errors
//! ├── ports/           # ViewActions + NavEffectTransformer (outbound)
//! └── application/     # SyncBlockchainHandler
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::SyncBlockchainHandler;
pub use domain::{NavTarget, SyncEffect, SyncError, SyncEvent};
pub use ports::{NavEffectTransformer, ViewActions};
