//! # Adapters
//!
//! Port implementations the runtime provides to subsystems.

mod rescan_view;

pub use rescan_view::{LogNavigator, LogView};
