//! # Domain Module
//!
//! Core domain types for the Wallet Tracker.

pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
