//! # Algorithms Module
//!
//! Pure planning over a snapshot. Nothing here talks to the engine.

pub mod event_slices;
pub mod reconcile;

pub use event_slices::{manager_created_registrations, network_added_decision};
pub use reconcile::{plan_disconnects, plan_pass, ReconcilePlan};
