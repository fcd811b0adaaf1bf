//! # Shared Types Crate
//!
//! This crate contains the wallet-domain value types used by every crate in
//! the workspace: the tracker core, the rescan handler, the event bus and the
//! runtime.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Normalized Identity**: `CurrencyId` equality is case-insensitive and
//!   that rule lives at the type boundary, nowhere else.
//! - **Snapshots, not handles**: the engine is observed through immutable
//!   `SystemSnapshot` values taken at query time.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
