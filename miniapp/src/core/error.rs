//! # Common Error Types
//!
//! Consolidated error handling for the Mini App.
//!
//! ## Error Categories
//!
//! - **Api**: backend communication ([`ApiError`])
//! - **Auth**: session bootstrap ([`AuthError`])
//! - **Domain**: rule violations caught before a request is sent ([`CoreError`])
//! - **Validation**: form input problems
//! - **State**: the store is not in a state that allows the action
//!
//! Every variant maps to an alert text through [`AppError::user_message`].

use lib_auth::AuthError;
use lib_core::CoreError;
use thiserror::Error;

use crate::services::api::ApiError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Domain(#[from] CoreError),

    /// Input validation error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use miniapp::core::error::AppError;
    ///
    /// let err = AppError::Validation("Hours must be greater than zero".to_string());
    /// assert_eq!(err.to_string(), "Validation error: Hours must be greater than zero");
    /// ```
    #[error("Validation error: {0}")]
    Validation(String),

    /// Application state error (not signed in, action already running).
    #[error("State error: {0}")]
    State(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Text shown to the user in an alert.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(e) => e.user_message(),
            AppError::Auth(e) => e.user_message(),
            AppError::Domain(e) => e.user_message(),
            AppError::Validation(msg) | AppError::State(msg) => msg.clone(),
        }
    }

    /// Whether this error ends the session.
    pub fn is_session_fatal(&self) -> bool {
        match self {
            AppError::Auth(_) => true,
            AppError::Api(e) => e.status() == Some(401),
            _ => false,
        }
    }
}
