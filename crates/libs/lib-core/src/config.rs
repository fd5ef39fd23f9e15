//! # Application Configuration
//!
//! This module manages client configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Range |
//! |---|---|---|
//! | `API_BASE_URL` | `http://localhost:8000` | `http(s)://` URL |
//! | `REQUEST_TIMEOUT_SECS` | `10` | 1-120 |
//! | `LISTINGS_PAGE_SIZE` | `5` | 1-100 |
//! | `ALLOW_UNSAFE_TELEGRAM_AUTH` | `false` | boolean |
//! | `SESSION_FILE` | unset (in-memory session) | path |
//!
//! A `.env` file in the working directory is read first, if present.
//!
//! ## Global Config Access
//!
//! Use [`core_config()`] to access the global configuration instance:
//!
//! ```rust,no_run
//! use lib_core::config::core_config;
//!
//! let config = core_config().unwrap();
//! let base = &config.api_base_url;
//! ```
//!
//! The config must be initialized once at application startup using [`init_config()`].

use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use lib_utils::envs::{get_env_bool, get_env_or, get_env_parse_or};

use crate::error::{CoreError, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LISTINGS_PAGE_SIZE: u32 = 5;

/// Client configuration loaded from environment variables.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Base URL of the time-bank backend, without a trailing slash
    pub api_base_url: String,

    /// Per-request timeout in seconds
    ///
    /// Valid range: 1-120
    pub request_timeout_secs: u64,

    /// Number of listings requested per feed page
    ///
    /// Valid range: 1-100
    pub listings_page_size: u32,

    /// Enables the unsigned `hash=debug_hash` authentication fallback.
    ///
    /// **Never enable outside local development.** The backend cannot tell
    /// such a claim apart from a forged one.
    pub allow_unsafe_telegram_auth: bool,

    /// Where to persist the bearer token between runs; in-memory when `None`
    pub session_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            listings_page_size: DEFAULT_LISTINGS_PAGE_SIZE,
            allow_unsafe_telegram_auth: false,
            session_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = get_env_or("API_BASE_URL", DEFAULT_API_BASE_URL)
            .trim()
            .trim_end_matches('/')
            .to_string();

        let request_timeout_secs =
            get_env_parse_or("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let listings_page_size = get_env_parse_or("LISTINGS_PAGE_SIZE", DEFAULT_LISTINGS_PAGE_SIZE)?;
        let allow_unsafe_telegram_auth = get_env_bool("ALLOW_UNSAFE_TELEGRAM_AUTH", false)?;

        let session_file = std::env::var("SESSION_FILE")
            .ok()
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_base_url,
            request_timeout_secs,
            listings_page_size,
            allow_unsafe_telegram_auth,
            session_file,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(CoreError::Config(
                "API_BASE_URL must start with http:// or https://".to_string(),
            ));
        }

        if self.request_timeout_secs < 1 || self.request_timeout_secs > 120 {
            return Err(CoreError::Config(
                "REQUEST_TIMEOUT_SECS must be between 1 and 120".to_string(),
            ));
        }

        if self.listings_page_size < 1 || self.listings_page_size > 100 {
            return Err(CoreError::Config(
                "LISTINGS_PAGE_SIZE must be between 1 and 100".to_string(),
            ));
        }

        Ok(())
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Environment variables are malformed
/// - Configuration validation fails
/// - Config has already been initialized
pub fn init_config() -> Result<&'static Config> {
    let config = Config::from_env()?;
    config.validate()?;

    if config.allow_unsafe_telegram_auth {
        tracing::warn!("ALLOW_UNSAFE_TELEGRAM_AUTH is enabled; unsigned Telegram claims will be sent");
    }

    CONFIG
        .set(config)
        .map_err(|_| CoreError::Config("Config has already been initialized".to_string()))?;
    core_config()
}

/// Get a reference to the global configuration.
///
/// Returns an error if [`init_config()`] has not been called yet.
pub fn core_config() -> Result<&'static Config> {
    CONFIG.get().ok_or_else(|| {
        CoreError::Config("Config must be initialized with init_config() before use".to_string())
    })
}
