//! # Logging and Tracing
//!
//! File-based structured logging for the Mini App.
//!
//! ## Features
//!
//! - **File-based logging**: `logs/miniapp.log` with daily rotation
//! - **Console output**: human-readable, filtered like the file log
//! - **Trace IDs**: every user action runs in a span carrying a fresh id,
//!   so the API calls it makes can be correlated in the log
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `miniapp=debug,info`)
//! - `MINIAPP_LOG_DIR`: Log directory (default: `logs`)
//! - `MINIAPP_LOG_JSON`: Write the file log as JSON lines (1=on, 0=off)

pub mod config;
pub mod logger;
pub mod trace_context;

pub use config::DebugConfig;
pub use logger::init as init_logger;
pub use trace_context::{action_span, new_trace_id};
