//! # Core Library
//!
//! Domain rules, configuration, and error types for the time-bank Mini App.
//!
//! - [`model::lifecycle`]: reference state machine for listing transitions
//! - [`model::settlement`]: deposit/settlement split and transfer direction
//! - [`model::friends`]: projections over the friend graph
//! - [`config`]: environment-driven client configuration

pub mod config;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::Config;
pub use error::{CoreError, Result};
pub use model::lifecycle::{Outcome, Transition};
pub use model::settlement::{Settlement, Transfer};
