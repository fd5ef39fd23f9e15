//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and better testability.
//!
//! ## Modules
//!
//! - **[`error`]**: Application error type (`AppError`, `Result<T>`)
//! - **[`service`]**: Service trait for dependency injection (`ApiService`)
//!
//! ## Error Handling
//!
//! Handler failures are converted to [`AppError`] and surfaced as an alert:
//!
//! ```rust
//! use miniapp::core::error::{AppError, Result};
//!
//! fn validate_query(input: &str) -> Result<&str> {
//!     if input.trim().len() < 2 {
//!         return Err(AppError::Validation("Type at least 2 characters".to_string()));
//!     }
//!     Ok(input.trim())
//! }
//!
//! assert!(validate_query("a").is_err());
//! ```
//!
//! ## Dependency Injection
//!
//! ```rust,ignore
//! // In production: the reqwest client
//! let api: Arc<dyn ApiService> = Arc::new(ApiClient::from_config(config));
//!
//! // In tests: an in-memory backend
//! let api: Arc<dyn ApiService> = Arc::new(MemoryBackend::new());
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::{ApiService, SessionBridge};
