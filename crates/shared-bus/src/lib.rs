//! # Shared Bus - Engine Events and Desired-Set Feed
//!
//! Transport for everything that flows *into* the wallet tracker:
//!
//! - **Engine events**: lifecycle notifications from the blockchain engine,
//!   modelled as one closed enum per event family (system, manager, wallet,
//!   transfer, network) and fanned out over an in-memory broadcast bus.
//! - **Desired set**: the full list of currencies the user wants active,
//!   published as complete replacements on a multi-subscriber feed.
//!
//! ```text
//! ┌──────────────┐   publish()    ┌──────────────┐  subscribe()  ┌──────────────┐
//! │    Engine    │ ─────────────→ │  Event Bus   │ ────────────→ │   Tracker    │
//! └──────────────┘                └──────────────┘               │  (listener)  │
//!                                                                └──────────────┘
//! ┌──────────────┐   publish()    ┌──────────────┐  subscribe()  ┌──────────────┐
//! │ User intent  │ ─────────────→ │DesiredSetFeed│ ────────────→ │   Tracker    │
//! └──────────────┘                └──────────────┘   first()     │ (reconciler) │
//!                                                                └──────────────┘
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod feed;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{
    EngineEvent, EventFilter, EventTopic, ManagerEvent, NetworkEvent, SystemEvent, TransferEvent,
    WalletEvent,
};
pub use feed::{DesiredSetFeed, DesiredSetStream};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
