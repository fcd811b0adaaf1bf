//! # Application Module
//!
//! Application services orchestrating the domain and outbound ports.

pub mod listener;
pub mod service;

pub use listener::TrackerListener;
pub use service::WalletTrackerService;
