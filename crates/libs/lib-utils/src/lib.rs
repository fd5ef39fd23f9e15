//! # Utilities Library
//!
//! Shared utility functions for environment variables, time, and validation.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_bool, get_env_or, get_env_parse, get_env_parse_or};
pub use time::{is_expired, now_utc, parse_timestamp, parse_utc};
pub use validation::{
    validate_max_length, validate_not_empty, validate_positive_hours, validate_tenths,
};
