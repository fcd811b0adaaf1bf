//! # Wiring
//!
//! Connects the engine's event bus to the wallet tracker.
//!
//! ```text
//! InMemorySystem ──emit──→ InMemoryEventBus ──recv──→ EventRouter
//!                                                         │
//!                                        SystemListener::handle_event
//!                                                         │
//!                                  ManagerCreated / NetworkAdded → task
//! ```

pub mod event_routing;

pub use event_routing::EventRouter;
