//! # Authentication Errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// The app was not opened through Telegram and no session exists.
    ///
    /// Fatal: there is no guest mode.
    #[error("App must be opened through Telegram")]
    NoTelegramContext,

    /// A strategy could not run (no token stored, no init data, disabled).
    /// The chain moves on to the next strategy.
    #[error("Strategy unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the credentials.
    #[error("Authentication rejected: {0}")]
    Rejected(String),

    /// Reading or writing the stored session failed.
    #[error("Session storage error: {0}")]
    Session(String),
}

impl AuthError {
    pub fn user_message(&self) -> String {
        match self {
            AuthError::NoTelegramContext => {
                "Please open this app through Telegram".to_string()
            }
            AuthError::Rejected(_) | AuthError::Unavailable(_) => {
                "Could not sign you in with Telegram. Please reopen the app.".to_string()
            }
            AuthError::Session(_) => "Could not restore your session".to_string(),
        }
    }
}
