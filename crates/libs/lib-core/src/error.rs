//! # Domain Error Handling
//!
//! This module defines [`CoreError`], the error type returned by the domain
//! rules in [`crate::model`] and by configuration loading. It follows the
//! `thiserror` pattern used across the workspace.
//!
//! ## Error Categories
//!
//! 1. **Rule violations** - an operation the domain does not allow
//!    - [`Forbidden`](CoreError::Forbidden): actor is not permitted
//!    - [`InvalidTransition`](CoreError::InvalidTransition): status precondition not met
//!
//! 2. **Input errors**
//!    - [`InvalidInput`](CoreError::InvalidInput): malformed listing or form data
//!    - [`NotFound`](CoreError::NotFound): referenced entity unknown
//!
//! 3. **Startup errors**
//!    - [`Config`](CoreError::Config): missing or out-of-range environment values
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{CoreError, Result};
//!
//! fn check_hours(hours: f64) -> Result<f64> {
//!     if hours <= 0.0 {
//!         return Err(CoreError::InvalidInput("Hours must be positive".to_string()));
//!     }
//!     Ok(hours)
//! }
//!
//! assert!(check_hours(0.0).is_err());
//! ```

use thiserror::Error;

/// Convenience type alias for `Result<T, CoreError>`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Error type for domain rules and configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The acting user may not perform this operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The listing is not in the status the transition requires.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Invalid user input validation error.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested entity not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Get a user-friendly error message.
    ///
    /// Configuration details are not shown to users.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Forbidden(msg)
            | CoreError::InvalidTransition(msg)
            | CoreError::InvalidInput(msg)
            | CoreError::NotFound(msg) => msg.clone(),
            CoreError::Config(_) => "The app is misconfigured".to_string(),
        }
    }
}

impl From<lib_utils::envs::Error> for CoreError {
    fn from(err: lib_utils::envs::Error) -> Self {
        match err {
            lib_utils::envs::Error::MissingEnv(name) => {
                CoreError::Config(format!("{} must be set in environment", name))
            }
            lib_utils::envs::Error::WrongFormat(name) => {
                CoreError::Config(format!("{} has an invalid value", name))
            }
        }
    }
}
