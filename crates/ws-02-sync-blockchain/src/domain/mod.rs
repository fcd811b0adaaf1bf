//! # Domain Module
//!
//! Effects the rescan screen requests and the events it receives back.

pub mod errors;
pub mod messages;

pub use errors::*;
pub use messages::*;
