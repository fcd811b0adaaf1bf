//! # Application Module

pub mod handler;

pub use handler::SyncBlockchainHandler;
