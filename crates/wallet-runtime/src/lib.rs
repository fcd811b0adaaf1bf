//! # Wallet Runtime Library
//!
//! This library exposes the internal modules of the wallet runtime for
//! testing. The main entry point is the `main.rs` binary.
//!
//! ## Modules
//!
//! - `config` - Environment-driven configuration
//! - `logging` - `tracing-subscriber` setup
//! - `networks` - Well-known networks the demo engine discovers
//! - `adapters` - Log-backed view and navigator for the rescan handler
//! - `wiring` - Event bus -> tracker listener routing
//! - `control` - Line-oriented operator console
//! - `runtime` - `WalletRuntime`, owning every task

#![warn(missing_docs)]

pub mod adapters;
pub mod config;
pub mod control;
pub mod logging;
pub mod networks;
pub mod runtime;
pub mod wiring;

pub use config::{ConfigError, RuntimeConfig};
pub use runtime::WalletRuntime;
