//! # lexis-cli
//!
//! The orchestrator boundary: HTTP clients for the two external
//! collaborators and the sequential sync runner the binary drives.

pub mod clients;
pub mod runner;

pub use runner::{SyncReport, SyncRunner};
