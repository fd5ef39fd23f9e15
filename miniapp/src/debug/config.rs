//! Debug configuration from environment variables

use std::path::PathBuf;

use lib_utils::envs::{get_env_bool, get_env_or};

pub const DEFAULT_LOG_LEVEL: &str = "miniapp=info,warn";
pub const LOG_FILE_NAME: &str = "miniapp.log";

/// Debug system configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugConfig {
    /// Log directory (for rotation)
    pub log_dir: PathBuf,
    /// Log level filter (e.g., "miniapp=debug,info")
    pub log_level: String,
    /// JSON lines instead of plain text in the file log
    pub json: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            log_dir: PathBuf::from(get_env_or("MINIAPP_LOG_DIR", "logs")),
            log_level: get_env_or("RUST_LOG", DEFAULT_LOG_LEVEL),
            json: get_env_bool("MINIAPP_LOG_JSON", false).unwrap_or(false),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}
