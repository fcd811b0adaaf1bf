//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for the wallet tracker.

mod desired_feed;
mod in_memory;

pub use in_memory::InMemorySystem;
