//! # Wallet-Sync Test Suite
//!
//! Cross-crate flows: the engine emits on the bus, the tracker listener
//! reacts, the reconciler and the rescan handler issue commands.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── harness.rs   # Engine + bus + tracker wiring, event pump
//!     ├── flows.rs     # Reconcile and listener flows
//!     └── rescan.rs    # ws-02 against a live engine
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ws-tests
//! ```

pub mod integration;
