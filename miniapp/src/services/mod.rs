//! # External Services
//!
//! - [`api`]: HTTP client for the time-bank backend

pub mod api;
